//! The fixed time-of-day vocabulary used for slot breakdowns.

use serde::{Deserialize, Serialize};

/// A time-of-day sales slot.
///
/// The variant order is significant: it is the display order of every
/// per-slot breakdown and the tie-break order when picking the peak slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Night,
}

serde_plain::derive_display_from_serialize!(TimeSlot);
serde_plain::derive_fromstr_from_deserialize!(TimeSlot);

impl TimeSlot {
    /// Every slot, in canonical display order.
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Night];

    /// The label as it appears in source data and chart axes.
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Night => "Night",
        }
    }

    /// Exact-match lookup. Cells with any other spelling (including case
    /// variants) belong to no slot.
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}
