//! Dataset Store: the immutable, in-memory snapshot of every operational dataset.
//!
//! A store is built once (from files via [`DatasetLoader`] or in memory via
//! [`DatasetStore::builder`]) and then shared read-only, typically behind an
//! `Arc`. Nothing in the crate mutates a store after construction, so concurrent
//! readers need no locking.

pub mod checksum;
pub mod error;
pub mod loader;

use chrono::NaiveDate;

use crate::models::*;

pub use checksum::calculate_checksum;
pub use error::{ErrorContext, StoreError, StoreResult};
pub use loader::{DataFormat, DatasetLoader};

/// The named datasets a store holds. File stems match the upstream generator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    ZoneCompliance,
    HourlyCompliance,
    SecurityLanes,
    PaxDaily,
    PaxHourly,
    PaxByAirline,
    Atm,
    BaggageBelts,
    Gates,
    Biometric,
    VocFeedback,
    VocMessages,
    Otp,
    BaggageDelivery,
    SlotAdherence,
    Safety,
}

impl Dataset {
    pub const ALL: [Dataset; 16] = [
        Dataset::ZoneCompliance,
        Dataset::HourlyCompliance,
        Dataset::SecurityLanes,
        Dataset::PaxDaily,
        Dataset::PaxHourly,
        Dataset::PaxByAirline,
        Dataset::Atm,
        Dataset::BaggageBelts,
        Dataset::Gates,
        Dataset::Biometric,
        Dataset::VocFeedback,
        Dataset::VocMessages,
        Dataset::Otp,
        Dataset::BaggageDelivery,
        Dataset::SlotAdherence,
        Dataset::Safety,
    ];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Dataset::ZoneCompliance => "queue_zone_compliance",
            Dataset::HourlyCompliance => "queue_hourly_compliance",
            Dataset::SecurityLanes => "security_lanes_daily",
            Dataset::PaxDaily => "pax_daily_volumes",
            Dataset::PaxHourly => "pax_hourly_showup",
            Dataset::PaxByAirline => "pax_by_airline",
            Dataset::Atm => "atm_daily",
            Dataset::BaggageBelts => "baggage_utilization",
            Dataset::Gates => "gate_utilization",
            Dataset::Biometric => "biometric_adoption",
            Dataset::VocFeedback => "voc_feedback",
            Dataset::VocMessages => "voc_messages",
            Dataset::Otp => "otp_daily",
            Dataset::BaggageDelivery => "baggage_delivery",
            Dataset::SlotAdherence => "slot_adherence",
            Dataset::Safety => "safety_issues",
        }
    }

    /// Datasets the four core analyses cannot run without.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Dataset::ZoneCompliance
                | Dataset::SecurityLanes
                | Dataset::PaxDaily
                | Dataset::PaxHourly
                | Dataset::VocFeedback
                | Dataset::VocMessages
        )
    }
}

/// Immutable snapshot of all datasets.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    pub(crate) zone_compliance: Vec<ZoneComplianceRow>,
    pub(crate) hourly_compliance: Vec<HourlyComplianceRow>,
    pub(crate) security_lanes: Vec<SecurityLaneRow>,
    pub(crate) pax_daily: Vec<PassengerVolumeRow>,
    pub(crate) pax_hourly: Vec<HourlyShowupRow>,
    pub(crate) pax_by_airline: Vec<AirlinePaxRow>,
    pub(crate) atm: Vec<AtmRow>,
    pub(crate) baggage_belts: Vec<BaggageBeltRow>,
    pub(crate) gates: Vec<GateRow>,
    pub(crate) biometric: Vec<BiometricRow>,
    pub(crate) voc_feedback: Vec<VocFeedbackRow>,
    pub(crate) voc_messages: Vec<VocMessageRow>,
    pub(crate) otp: Vec<OtpRow>,
    pub(crate) baggage_delivery: Vec<BaggageDeliveryRow>,
    pub(crate) slot_adherence: Vec<SlotAdherenceRow>,
    pub(crate) safety: Vec<SafetyIssueRow>,
}

impl DatasetStore {
    pub fn builder() -> DatasetStoreBuilder {
        DatasetStoreBuilder::default()
    }

    pub fn zone_compliance(&self) -> &[ZoneComplianceRow] {
        &self.zone_compliance
    }

    pub fn hourly_compliance(&self) -> &[HourlyComplianceRow] {
        &self.hourly_compliance
    }

    pub fn security_lanes(&self) -> &[SecurityLaneRow] {
        &self.security_lanes
    }

    pub fn pax_daily(&self) -> &[PassengerVolumeRow] {
        &self.pax_daily
    }

    pub fn pax_hourly(&self) -> &[HourlyShowupRow] {
        &self.pax_hourly
    }

    pub fn pax_by_airline(&self) -> &[AirlinePaxRow] {
        &self.pax_by_airline
    }

    pub fn atm(&self) -> &[AtmRow] {
        &self.atm
    }

    pub fn baggage_belts(&self) -> &[BaggageBeltRow] {
        &self.baggage_belts
    }

    pub fn gates(&self) -> &[GateRow] {
        &self.gates
    }

    pub fn biometric(&self) -> &[BiometricRow] {
        &self.biometric
    }

    pub fn voc_feedback(&self) -> &[VocFeedbackRow] {
        &self.voc_feedback
    }

    pub fn voc_messages(&self) -> &[VocMessageRow] {
        &self.voc_messages
    }

    pub fn otp(&self) -> &[OtpRow] {
        &self.otp
    }

    pub fn baggage_delivery(&self) -> &[BaggageDeliveryRow] {
        &self.baggage_delivery
    }

    pub fn slot_adherence(&self) -> &[SlotAdherenceRow] {
        &self.slot_adherence
    }

    pub fn safety(&self) -> &[SafetyIssueRow] {
        &self.safety
    }

    /// Row count of one dataset.
    pub fn row_count(&self, dataset: Dataset) -> usize {
        match dataset {
            Dataset::ZoneCompliance => self.zone_compliance.len(),
            Dataset::HourlyCompliance => self.hourly_compliance.len(),
            Dataset::SecurityLanes => self.security_lanes.len(),
            Dataset::PaxDaily => self.pax_daily.len(),
            Dataset::PaxHourly => self.pax_hourly.len(),
            Dataset::PaxByAirline => self.pax_by_airline.len(),
            Dataset::Atm => self.atm.len(),
            Dataset::BaggageBelts => self.baggage_belts.len(),
            Dataset::Gates => self.gates.len(),
            Dataset::Biometric => self.biometric.len(),
            Dataset::VocFeedback => self.voc_feedback.len(),
            Dataset::VocMessages => self.voc_messages.len(),
            Dataset::Otp => self.otp.len(),
            Dataset::BaggageDelivery => self.baggage_delivery.len(),
            Dataset::SlotAdherence => self.slot_adherence.len(),
            Dataset::Safety => self.safety.len(),
        }
    }

    /// Earliest and latest date across the queue and passenger tables.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .zone_compliance
            .iter()
            .map(Dated::date)
            .chain(self.pax_daily.iter().map(Dated::date));
        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}

/// Assembles a [`DatasetStore`] from rows already in memory.
#[derive(Debug, Default)]
pub struct DatasetStoreBuilder {
    store: DatasetStore,
}

impl DatasetStoreBuilder {
    /// Zone rows; `variance_from_target` is recomputed on the way in.
    pub fn zone_compliance(mut self, rows: impl IntoIterator<Item = ZoneComplianceRow>) -> Self {
        self.store.zone_compliance.extend(
            rows.into_iter()
                .map(ZoneComplianceRow::with_recomputed_variance),
        );
        self
    }

    pub fn hourly_compliance(
        mut self,
        rows: impl IntoIterator<Item = HourlyComplianceRow>,
    ) -> Self {
        self.store.hourly_compliance.extend(rows);
        self
    }

    pub fn security_lanes(mut self, rows: impl IntoIterator<Item = SecurityLaneRow>) -> Self {
        self.store.security_lanes.extend(rows);
        self
    }

    pub fn pax_daily(mut self, rows: impl IntoIterator<Item = PassengerVolumeRow>) -> Self {
        self.store.pax_daily.extend(rows);
        self
    }

    pub fn pax_hourly(mut self, rows: impl IntoIterator<Item = HourlyShowupRow>) -> Self {
        self.store.pax_hourly.extend(rows);
        self
    }

    pub fn pax_by_airline(mut self, rows: impl IntoIterator<Item = AirlinePaxRow>) -> Self {
        self.store.pax_by_airline.extend(rows);
        self
    }

    pub fn atm(mut self, rows: impl IntoIterator<Item = AtmRow>) -> Self {
        self.store.atm.extend(rows);
        self
    }

    pub fn baggage_belts(mut self, rows: impl IntoIterator<Item = BaggageBeltRow>) -> Self {
        self.store.baggage_belts.extend(rows);
        self
    }

    pub fn gates(mut self, rows: impl IntoIterator<Item = GateRow>) -> Self {
        self.store.gates.extend(rows);
        self
    }

    pub fn biometric(mut self, rows: impl IntoIterator<Item = BiometricRow>) -> Self {
        self.store.biometric.extend(rows);
        self
    }

    pub fn voc_feedback(mut self, rows: impl IntoIterator<Item = VocFeedbackRow>) -> Self {
        self.store.voc_feedback.extend(rows);
        self
    }

    pub fn voc_messages(mut self, rows: impl IntoIterator<Item = VocMessageRow>) -> Self {
        self.store.voc_messages.extend(rows);
        self
    }

    pub fn otp(mut self, rows: impl IntoIterator<Item = OtpRow>) -> Self {
        self.store.otp.extend(rows);
        self
    }

    pub fn baggage_delivery(mut self, rows: impl IntoIterator<Item = BaggageDeliveryRow>) -> Self {
        self.store.baggage_delivery.extend(rows);
        self
    }

    pub fn slot_adherence(mut self, rows: impl IntoIterator<Item = SlotAdherenceRow>) -> Self {
        self.store.slot_adherence.extend(rows);
        self
    }

    pub fn safety(mut self, rows: impl IntoIterator<Item = SafetyIssueRow>) -> Self {
        self.store.safety.extend(rows);
        self
    }

    pub fn build(self) -> DatasetStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(date: NaiveDate, actual: f64) -> ZoneComplianceRow {
        ZoneComplianceRow {
            date,
            zone: "Check-in 1-33".to_string(),
            terminal: Terminal::T1,
            zone_type: ZoneType::Checkin,
            time_window: "0600-0800".to_string(),
            threshold_minutes: 10,
            target_compliance_pct: 95.0,
            actual_compliance_pct: actual,
            pax_total: 100,
            pax_meeting_threshold: 90,
            avg_wait_time_min: 6.0,
            // stale on purpose; the builder must recompute it
            variance_from_target: 42.0,
        }
    }

    #[test]
    fn test_builder_recomputes_variance() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 24).unwrap();
        let store = DatasetStore::builder()
            .zone_compliance(vec![zone(d, 90.0)])
            .build();
        assert_eq!(store.zone_compliance()[0].variance_from_target, -5.0);
    }

    #[test]
    fn test_date_range() {
        let d1 = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 1, 24).unwrap();
        let store = DatasetStore::builder()
            .zone_compliance(vec![zone(d2, 96.0), zone(d1, 96.0)])
            .build();
        assert_eq!(store.date_range(), Some((d1, d2)));
        assert_eq!(DatasetStore::default().date_range(), None);
    }

    #[test]
    fn test_required_datasets() {
        let required: Vec<_> = Dataset::ALL
            .iter()
            .filter(|d| d.is_required())
            .map(|d| d.file_stem())
            .collect();
        assert_eq!(
            required,
            vec![
                "queue_zone_compliance",
                "security_lanes_daily",
                "pax_daily_volumes",
                "pax_hourly_showup",
                "voc_feedback",
                "voc_messages"
            ]
        );
    }
}
