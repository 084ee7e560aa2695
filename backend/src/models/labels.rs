//! Categorical labels shared across the operational datasets.

use crate::define_label_type;

define_label_type!(
    /// Terminal building. Feedback rollups also use non-terminal labels such as
    /// `Overall`; those load as [`Terminal::Other`] and never match a terminal filter.
    Terminal { T1 => "T1", T2 => "T2" }
);

define_label_type!(
    /// Processing stage a queue zone belongs to.
    ZoneType { Entry => "Entry", Checkin => "Checkin", Security => "Security" }
);

define_label_type!(
    LaneGroup {
        Left => "Left",
        Right => "Right",
        International => "International",
        Swing => "Swing",
    }
);

define_label_type!(Flow { Arrival => "Arrival", Departure => "Departure" });

define_label_type!(
    PassengerType { Domestic => "Domestic", International => "International" }
);
