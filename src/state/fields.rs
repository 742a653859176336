//! Role: The enumerated field-key table.
//!
//! Logical query keys are dot-qualified (`Timestamp.gt`); DOM identifiers
//! replace the dot with an underscore because dots are not legal in the
//! lookup convention. Keeping the mapping in one table avoids stringly-typed
//! substitution at every call site.

/// Editable text fields of the query form, in form (DOM) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    TimestampGt,
    TimestampLt,
    Agent,
    SrcAddr,
    DstAddr,
    Protocol,
    SrcPort,
    DstPort,
    SrcAsn,
    DstAsn,
    SrcPfx,
    DstPfx,
    IntInName,
    IntOutName,
    TopN,
}

impl FieldKey {
    pub const ALL: [FieldKey; 15] = [
        FieldKey::TimestampGt,
        FieldKey::TimestampLt,
        FieldKey::Agent,
        FieldKey::SrcAddr,
        FieldKey::DstAddr,
        FieldKey::Protocol,
        FieldKey::SrcPort,
        FieldKey::DstPort,
        FieldKey::SrcAsn,
        FieldKey::DstAsn,
        FieldKey::SrcPfx,
        FieldKey::DstPfx,
        FieldKey::IntInName,
        FieldKey::IntOutName,
        FieldKey::TopN,
    ];

    /// Logical key used in the URL fragment.
    pub fn key(self) -> &'static str {
        match self {
            FieldKey::TimestampGt => "Timestamp.gt",
            FieldKey::TimestampLt => "Timestamp.lt",
            FieldKey::Agent => "Agent",
            FieldKey::SrcAddr => "SrcAddr",
            FieldKey::DstAddr => "DstAddr",
            FieldKey::Protocol => "Protocol",
            FieldKey::SrcPort => "SrcPort",
            FieldKey::DstPort => "DstPort",
            FieldKey::SrcAsn => "SrcAsn",
            FieldKey::DstAsn => "DstAsn",
            FieldKey::SrcPfx => "SrcPfx",
            FieldKey::DstPfx => "DstPfx",
            FieldKey::IntInName => "IntInName",
            FieldKey::IntOutName => "IntOutName",
            FieldKey::TopN => "TopN",
        }
    }

    /// Form-field identifier: the logical key with `.` replaced by `_`.
    pub fn dom_id(self) -> &'static str {
        match self {
            FieldKey::TimestampGt => "Timestamp_gt",
            FieldKey::TimestampLt => "Timestamp_lt",
            other => other.key(),
        }
    }

    pub fn from_key(key: &str) -> Option<FieldKey> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn from_dom_id(id: &str) -> Option<FieldKey> {
        Self::ALL.iter().copied().find(|f| f.dom_id() == id)
    }

    /// Timestamp fields carry epoch seconds in the fragment and a local
    /// `YYYY-MM-DDTHH:MM` string in the form.
    pub fn is_timestamp(self) -> bool {
        matches!(self, FieldKey::TimestampGt | FieldKey::TimestampLt)
    }
}

/// True for any fragment key carrying epoch seconds, per the `Timestamp`
/// prefix naming convention.
pub fn is_timestamp_key(key: &str) -> bool {
    key.starts_with("Timestamp")
}

/// Breakdown checkbox identifiers in UI order. Checkbox DOM ids carry a
/// `bd` prefix.
pub const BREAKDOWN_DIMENSIONS: [&str; 16] = [
    "Family",
    "SrcAddr",
    "DstAddr",
    "Protocol",
    "IntIn",
    "IntOut",
    "NextHop",
    "SrcAsn",
    "DstAsn",
    "NextHopAsn",
    "SrcPfx",
    "DstPfx",
    "SrcPort",
    "DstPort",
    "IntInName",
    "IntOutName",
];

/// DOM id of a breakdown checkbox.
pub fn breakdown_dom_id(dimension: &str) -> String {
    format!("bd{dimension}")
}
