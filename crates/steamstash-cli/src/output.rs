//! Terminal rendering of player profiles and classified inventories.

use steamstash_core::{ClassifiedItem, Player};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

const SEPARATOR_WIDTH: usize = 142;
const LABEL_WIDTH: usize = 26;

/// Print the profile block for one loaded account, preceded by a divider
/// so consecutive accounts stay visually apart.
pub fn render_player(player: &Player) {
    println!("{}", "_".repeat(SEPARATOR_WIDTH));
    field("Steam ID", player.steam_id.to_string());
    field("Steam user", text(player.handle.as_deref()));

    let profile = &player.profile;
    field("Persona name", text(profile.persona_name.as_deref()));
    field("Profile URL", text(profile.profile_url.as_deref()));
    field("Avatar", text(profile.avatar.as_deref()));
    field("Avatar medium", text(profile.avatar_medium.as_deref()));
    field("Avatar full", text(profile.avatar_full.as_deref()));
    field("Avatar hash", text(profile.avatar_hash.as_deref()));
    field("Persona state", number(profile.persona_state));
    field("Persona state flags", number(profile.persona_state_flags));
    field(
        "Community visibility state",
        number(profile.community_visibility_state),
    );
    field("Profile state", number(profile.profile_state));
    field("Last logoff", format_timestamp(profile.last_logoff));
    field("Comment permission", number(profile.comment_permission));
    field("Real name", text(profile.real_name.as_deref()));
    field("Primary clan ID", text(profile.primary_clan_id.as_deref()));
    field("Time created", format_timestamp(profile.time_created));
    field("Game ID", text(profile.game_id.as_deref()));
    field("Game extra info", text(profile.game_extra_info.as_deref()));
    field("Country code", text(profile.country_code.as_deref()));
    field("State code", text(profile.state_code.as_deref()));
    field("City ID", number(profile.city_id));
}

/// Print one fixed-width row per surviving item, in inventory order.
pub fn render_inventory(items: &[&ClassifiedItem]) {
    for item in items {
        println!("{}", item_row(item));
    }
}

fn field(label: &str, value: impl AsRef<str>) {
    println!("{label:<width$}: {}", value.as_ref(), width = LABEL_WIDTH);
}

fn item_row(item: &ClassifiedItem) -> String {
    format!(
        "{:<12}|{:<2}|{:<2}|{:<2}|{:<40}|{:<40}|{:<30}|{:<30}|{:<60}",
        item.tag,
        u8::from(item.is_marketable()),
        u8::from(item.is_tradable()),
        u8::from(item.may_be_gifted_once),
        text(item.record.market_name.as_deref()),
        text(item.record.market_hash_name.as_deref()),
        item.label,
        text(item.record.type_label.as_deref()),
        text(item.record.name.as_deref()),
    )
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

fn number(value: Option<i64>) -> String {
    value.map_or_else(|| String::from("-"), |n| n.to_string())
}

/// Unix timestamps render as RFC 3339 in UTC; out-of-range values fall
/// back to the raw number rather than failing the whole listing.
fn format_timestamp(value: Option<i64>) -> String {
    let Some(ts) = value else {
        return String::from("-");
    };
    OffsetDateTime::from_unix_timestamp(ts)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| ts.to_string())
}
