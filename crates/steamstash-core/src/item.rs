use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::taxonomy::{classify, may_be_gifted_once, Classification, ItemTag};

/// One nested line under a record's `descriptions` array. Only the free
/// text `value` matters here; lines without one are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Raw inventory description record as the remote service returns it.
///
/// Identity is the `(classid, instanceid)` pair and is the only required
/// part of the record. Everything else may be absent and then simply never
/// matches a classification rule. Duplicate identities across pages are
/// legitimate (several asset stacks can share one description) and are
/// kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub classid: String,
    pub instanceid: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_hash_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradable: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketable: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<DescriptionLine>,
}

impl ItemRecord {
    /// Parse one description record out of a fetched or cached blob.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        serde_json::from_value(value.clone())
            .map_err(|err| Error::validation(format!("invalid item record: {err}")))
    }

    /// The remote service encodes booleans as 0/1; absent counts as 0.
    pub fn is_tradable(&self) -> bool {
        self.tradable.unwrap_or(0) == 1
    }

    pub fn is_marketable(&self) -> bool {
        self.marketable.unwrap_or(0) == 1
    }

    /// Free-text values of the description lines, skipping lines without one.
    pub fn description_values(&self) -> impl Iterator<Item = &str> {
        self.descriptions
            .iter()
            .filter_map(|entry| entry.value.as_deref())
    }
}

/// Inventory record plus the attributes derived from it at classification
/// time. Derived fields are computed once when the record enters the
/// aggregate and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedItem {
    pub record: ItemRecord,
    pub tag: ItemTag,
    pub label: String,
    pub may_be_gifted_once: bool,
}

impl ClassifiedItem {
    /// Run the record through the rule cascade and freeze the outcome.
    pub fn from_record(record: ItemRecord) -> Self {
        let Classification { tag, label } = classify(&record);
        let may_be_gifted_once = may_be_gifted_once(&record);

        Self {
            record,
            tag,
            label,
            may_be_gifted_once,
        }
    }

    pub fn is_tradable(&self) -> bool {
        self.record.is_tradable()
    }

    pub fn is_marketable(&self) -> bool {
        self.record.is_marketable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_parses_from_a_full_blob() {
        let value = json!({
            "classid": "1688502434",
            "instanceid": "5156448426",
            "type": "Mythical Bundle",
            "name": "Righteous Thunderbolt",
            "market_name": "Righteous Thunderbolt",
            "market_hash_name": "Righteous Thunderbolt",
            "tradable": 1,
            "marketable": 0,
            "descriptions": [{"value": "Used By: Zeus"}],
        });

        let record = ItemRecord::from_value(&value).expect("record should parse");

        assert_eq!(record.classid, "1688502434");
        assert_eq!(record.type_label.as_deref(), Some("Mythical Bundle"));
        assert!(record.is_tradable());
        assert!(!record.is_marketable());
    }

    #[test]
    fn identity_fields_are_required() {
        let value = json!({"instanceid": "0", "type": "Wearable"});

        let error = ItemRecord::from_value(&value).expect_err("classid is required");

        assert!(matches!(error, Error::Validation(_)));
        assert!(error.to_string().contains("classid"));
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let value = json!({"classid": "9", "instanceid": "0"});

        let record = ItemRecord::from_value(&value).expect("record should parse");

        assert_eq!(record.type_label, None);
        assert!(!record.is_tradable());
        assert!(!record.is_marketable());
        assert_eq!(record.description_values().count(), 0);
    }

    #[test]
    fn extra_remote_fields_are_ignored() {
        let value = json!({
            "classid": "9",
            "instanceid": "0",
            "appid": 570,
            "icon_url": "fWFc82js0fmoRAP-qOIPu5THSWqfSmTE",
            "currency": 0,
        });

        assert!(ItemRecord::from_value(&value).is_ok());
    }

    #[test]
    fn classification_freezes_tag_label_and_gift_flag() {
        let value = json!({
            "classid": "33",
            "instanceid": "0",
            "type": "Rare Wearable",
            "tradable": 1,
            "descriptions": [
                {"value": "Used By: Juggernaut"},
                {"value": "This item may be gifted once."},
            ],
        });
        let record = ItemRecord::from_value(&value).expect("record should parse");

        let item = ClassifiedItem::from_record(record);

        assert_eq!(item.tag, ItemTag::Hero);
        assert_eq!(item.label, "Juggernaut");
        assert!(item.may_be_gifted_once);
        assert!(item.is_tradable());
        assert!(!item.is_marketable());
    }
}
