//! Snapshot fingerprinting.

use sha2::{Digest, Sha256};

use super::{Dataset, DatasetStore};

/// Calculate SHA-256 checksum of arbitrary text content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

impl DatasetStore {
    /// SHA-256 over every table of the snapshot.
    ///
    /// Two stores with equal rows (in equal order) share a fingerprint, which
    /// makes it cheap to tell whether a reload actually changed anything.
    pub fn fingerprint(&self) -> String {
        let mut content = String::new();
        for dataset in Dataset::ALL {
            content.push_str(dataset.file_stem());
            content.push_str(&self.row_count(dataset).to_string());
            content.push_str(&self.table_debug(dataset));
        }
        calculate_checksum(&content)
    }

    fn table_debug(&self, dataset: Dataset) -> String {
        match dataset {
            Dataset::ZoneCompliance => format!("{:?}", self.zone_compliance),
            Dataset::HourlyCompliance => format!("{:?}", self.hourly_compliance),
            Dataset::SecurityLanes => format!("{:?}", self.security_lanes),
            Dataset::PaxDaily => format!("{:?}", self.pax_daily),
            Dataset::PaxHourly => format!("{:?}", self.pax_hourly),
            Dataset::PaxByAirline => format!("{:?}", self.pax_by_airline),
            Dataset::Atm => format!("{:?}", self.atm),
            Dataset::BaggageBelts => format!("{:?}", self.baggage_belts),
            Dataset::Gates => format!("{:?}", self.gates),
            Dataset::Biometric => format!("{:?}", self.biometric),
            Dataset::VocFeedback => format!("{:?}", self.voc_feedback),
            Dataset::VocMessages => format!("{:?}", self.voc_messages),
            Dataset::Otp => format!("{:?}", self.otp),
            Dataset::BaggageDelivery => format!("{:?}", self.baggage_delivery),
            Dataset::SlotAdherence => format!("{:?}", self.slot_adherence),
            Dataset::Safety => format!("{:?}", self.safety),
        }
    }
}
