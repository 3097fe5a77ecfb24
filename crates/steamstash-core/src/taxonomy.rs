use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::item::ItemRecord;

/// Description line prefix that marks an item as hero equipment.
pub(crate) const USED_BY_PREFIX: &str = "Used By:";

/// Phrase the remote service embeds in description lines of items that can
/// still be gifted exactly once.
pub(crate) const GIFT_ONCE_PHRASE: &str = "This item may be gifted once";

/// Fixed item taxonomy. Every inventory record lands in exactly one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTag {
    #[serde(rename = "BUNDLE")]
    Bundle,
    #[serde(rename = "COURIER")]
    Courier,
    #[serde(rename = "HERO")]
    Hero,
    #[serde(rename = "HERO_BUNDLE")]
    HeroBundle,
    #[serde(rename = "MISC")]
    Misc,
    #[serde(rename = "WARD")]
    Ward,
    #[serde(rename = "WEATHER")]
    Weather,
}

impl ItemTag {
    pub const ALL: [Self; 7] = [
        Self::Bundle,
        Self::Courier,
        Self::Hero,
        Self::HeroBundle,
        Self::Misc,
        Self::Ward,
        Self::Weather,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bundle => "BUNDLE",
            Self::Courier => "COURIER",
            Self::Hero => "HERO",
            Self::HeroBundle => "HERO_BUNDLE",
            Self::Misc => "MISC",
            Self::Ward => "WARD",
            Self::Weather => "WEATHER",
        }
    }
}

impl Display for ItemTag {
    // pad() so width specifiers in listing rows keep working
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemTag {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BUNDLE" => Ok(Self::Bundle),
            "COURIER" => Ok(Self::Courier),
            "HERO" => Ok(Self::Hero),
            "HERO_BUNDLE" => Ok(Self::HeroBundle),
            "MISC" => Ok(Self::Misc),
            "WARD" => Ok(Self::Ward),
            "WEATHER" => Ok(Self::Weather),
            other => Err(Error::validation(format!(
                "unknown item tag '{other}', expected one of BUNDLE, COURIER, HERO, HERO_BUNDLE, MISC, WARD, WEATHER"
            ))),
        }
    }
}

/// Outcome of running a record through the rule cascade: the tag it landed
/// in plus a display label. Fixed tags label themselves; hero equipment is
/// labelled with the hero it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: ItemTag,
    pub label: String,
}

impl Classification {
    fn fixed(tag: ItemTag) -> Self {
        Self {
            tag,
            label: tag.as_str().to_owned(),
        }
    }
}

/// One classification rule. Returns a classification when the rule matches,
/// `None` to hand the record to the next rule.
type Rule = fn(&ItemRecord) -> Option<Classification>;

/// Ordered rule table. Order is the tie-break: the first matching rule wins
/// outright, so a type label naming both "Ward" and "Courier" resolves as a
/// courier, and a bundle with a "Used By:" line resolves as a hero bundle
/// rather than a plain bundle.
const RULES: [Rule; 5] = [courier, weather, ward, hero_equipment, bundle];

/// Classify one record. Records no rule claims land in `MISC`.
pub fn classify(record: &ItemRecord) -> Classification {
    RULES
        .iter()
        .find_map(|rule| rule(record))
        .unwrap_or_else(|| Classification::fixed(ItemTag::Misc))
}

/// True when any description line carries the gift-once phrase. Records
/// without description lines are not giftable.
pub fn may_be_gifted_once(record: &ItemRecord) -> bool {
    record
        .description_values()
        .any(|value| value.contains(GIFT_ONCE_PHRASE))
}

fn type_label_contains(record: &ItemRecord, needle: &str) -> bool {
    record
        .type_label
        .as_deref()
        .is_some_and(|label| label.contains(needle))
}

fn courier(record: &ItemRecord) -> Option<Classification> {
    type_label_contains(record, "Courier").then(|| Classification::fixed(ItemTag::Courier))
}

fn weather(record: &ItemRecord) -> Option<Classification> {
    type_label_contains(record, "Weather").then(|| Classification::fixed(ItemTag::Weather))
}

fn ward(record: &ItemRecord) -> Option<Classification> {
    type_label_contains(record, "Ward").then(|| Classification::fixed(ItemTag::Ward))
}

/// Hero equipment carries a "Used By:" description line naming the hero.
/// When the type label also says "Bundle", the item is a hero bundle.
fn hero_equipment(record: &ItemRecord) -> Option<Classification> {
    let hero = record.description_values().find_map(|value| {
        value
            .strip_prefix(USED_BY_PREFIX)
            .map(|rest| rest.trim().to_owned())
    })?;

    let tag = if type_label_contains(record, "Bundle") {
        ItemTag::HeroBundle
    } else {
        ItemTag::Hero
    };

    Some(Classification { tag, label: hero })
}

fn bundle(record: &ItemRecord) -> Option<Classification> {
    type_label_contains(record, "Bundle").then(|| Classification::fixed(ItemTag::Bundle))
}
