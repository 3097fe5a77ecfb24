use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{BlobCache, CacheKey, CacheMode};
use crate::error::Error;
use crate::item::{ClassifiedItem, ItemRecord};
use crate::steam::{InventoryPayload, SteamApiClient};
use crate::taxonomy::ItemTag;

/// Stable numeric account identifier (64-bit SteamID), distinct from the
/// human-chosen vanity handle that may point at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SteamId(u64);

impl SteamId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("steam id must not be empty"));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::validation(format!("steam id must be numeric, got '{trimmed}'")))
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for SteamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Which account to load: a numeric id used directly, or a vanity handle
/// that goes through the identity lookup first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSelector {
    Id(SteamId),
    Handle(String),
}

impl PlayerSelector {
    pub fn handle(handle: impl Into<String>) -> Self {
        Self::Handle(handle.into())
    }
}

impl Display for PlayerSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Handle(handle) => f.write_str(handle),
        }
    }
}

/// Typed view over the verbatim profile summary blob. Every field is
/// optional; accounts expose different sets depending on privacy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(rename = "personaname", default)]
    pub persona_name: Option<String>,
    #[serde(rename = "profileurl", default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "avatarmedium", default)]
    pub avatar_medium: Option<String>,
    #[serde(rename = "avatarfull", default)]
    pub avatar_full: Option<String>,
    #[serde(rename = "avatarhash", default)]
    pub avatar_hash: Option<String>,
    #[serde(rename = "personastate", default)]
    pub persona_state: Option<i64>,
    #[serde(rename = "personastateflags", default)]
    pub persona_state_flags: Option<i64>,
    #[serde(rename = "communityvisibilitystate", default)]
    pub community_visibility_state: Option<i64>,
    #[serde(rename = "profilestate", default)]
    pub profile_state: Option<i64>,
    #[serde(rename = "lastlogoff", default)]
    pub last_logoff: Option<i64>,
    #[serde(rename = "commentpermission", default)]
    pub comment_permission: Option<i64>,
    #[serde(rename = "realname", default)]
    pub real_name: Option<String>,
    #[serde(rename = "primaryclanid", default)]
    pub primary_clan_id: Option<String>,
    #[serde(rename = "timecreated", default)]
    pub time_created: Option<i64>,
    #[serde(rename = "gameid", default)]
    pub game_id: Option<String>,
    #[serde(rename = "gameextrainfo", default)]
    pub game_extra_info: Option<String>,
    #[serde(rename = "loccountrycode", default)]
    pub country_code: Option<String>,
    #[serde(rename = "locstatecode", default)]
    pub state_code: Option<String>,
    #[serde(rename = "loccityid", default)]
    pub city_id: Option<i64>,
}

impl PlayerProfile {
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        serde_json::from_value(value.clone())
            .map_err(|err| Error::validation(format!("invalid profile blob: {err}")))
    }

    /// Vanity segment of the profile URL, present only for accounts that
    /// chose one (`https://steamcommunity.com/id/<handle>/`). Accounts
    /// without a handle expose a `/profiles/<id>/` URL instead.
    pub fn vanity_handle(&self) -> Option<&str> {
        let url = self.profile_url.as_deref()?;
        let mut segments = url.trim_end_matches('/').rsplit('/');
        let last = segments.next()?;
        let kind = segments.next()?;
        (kind == "id" && !last.is_empty()).then_some(last)
    }
}

/// Fully loaded account: identity, profile, and the classified inventory.
/// A `Player` is rebuilt from blobs on every load; nothing is mutated in
/// place across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub steam_id: SteamId,
    pub handle: Option<String>,
    pub profile: PlayerProfile,
    pub inventory: Vec<ClassifiedItem>,
}

impl Player {
    /// Apply `filter`, returning surviving items in their original order.
    pub fn filtered(&self, filter: &InventoryFilter) -> Vec<&ClassifiedItem> {
        filter.apply(&self.inventory)
    }
}

/// Conjunction of optional predicates over a classified inventory. Every
/// set predicate must hold for an item to survive; unset predicates impose
/// nothing.
///
/// The default view drops `HERO` and `MISC` items before the predicates
/// run, keeping the listing to the categories that are usually traded;
/// `full_view` lifts that cut.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryFilter {
    pub tag: Option<ItemTag>,
    pub label: Option<String>,
    pub marketable: bool,
    pub tradable: bool,
    pub giftable: bool,
    pub full_view: bool,
}

impl InventoryFilter {
    pub fn apply<'a>(&self, items: &'a [ClassifiedItem]) -> Vec<&'a ClassifiedItem> {
        items
            .iter()
            .filter(|item| self.full_view || !matches!(item.tag, ItemTag::Hero | ItemTag::Misc))
            .filter(|item| self.tag.is_none_or(|tag| item.tag == tag))
            .filter(|item| self.label.as_deref().is_none_or(|label| item.label == label))
            .filter(|item| !self.marketable || item.is_marketable())
            .filter(|item| !self.tradable || item.is_tradable())
            .filter(|item| !self.giftable || item.may_be_gifted_once)
            .collect()
    }
}

/// Composes identity resolution, the blob cache, and the paginated fetcher
/// into one load pipeline.
#[derive(Clone)]
pub struct PlayerLoader {
    api: SteamApiClient,
    cache: BlobCache,
}

impl PlayerLoader {
    pub fn new(api: SteamApiClient, cache: BlobCache) -> Self {
        Self { api, cache }
    }

    /// Load one account end to end: resolve the selector to a numeric id,
    /// obtain the profile and inventory blobs (stored copies first unless
    /// `mode` forces a refresh), and classify every description record.
    ///
    /// Identity resolution never touches the cache; only the two blobs do.
    pub fn load(
        &self,
        selector: &PlayerSelector,
        app_id: u32,
        mode: CacheMode,
    ) -> Result<Player, Error> {
        let steam_id = match selector {
            PlayerSelector::Id(id) => *id,
            PlayerSelector::Handle(handle) => self.api.resolve_vanity(handle)?,
        };

        let summary: Value = self.cache.get_or_populate(
            &CacheKey::summaries(steam_id),
            mode,
            || self.api.player_summary(steam_id),
        )?;
        let profile = PlayerProfile::from_value(&summary)?;

        let payload: InventoryPayload = self.cache.get_or_populate(
            &CacheKey::inventory(steam_id, app_id),
            mode,
            || self.api.inventory(steam_id, app_id),
        )?;

        let inventory = payload
            .descriptions
            .iter()
            .map(|value| ItemRecord::from_value(value).map(ClassifiedItem::from_record))
            .collect::<Result<Vec<_>, _>>()?;

        let handle = match selector {
            PlayerSelector::Handle(handle) => Some(handle.clone()),
            PlayerSelector::Id(_) => profile.vanity_handle().map(str::to_owned),
        };

        Ok(Player {
            steam_id,
            handle,
            profile,
            inventory,
        })
    }
}
