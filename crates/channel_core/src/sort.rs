use shared::domain::{Character, ListKind, StatusType};

use crate::roster::CharacterManager;

const LOWEST_TOKEN: &str = "z";

/// Positive lists in descending priority.
const PRIORITY_LISTS: [ListKind; 4] = [
    ListKind::Friend,
    ListKind::Bookmark,
    ListKind::Interested,
    ListKind::Moderator,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortScheme {
    /// Every online status shares one tier; offline sorts last.
    Alphabetical,
    #[default]
    Priority,
}

impl SortScheme {
    pub fn from_alphabetical(alphabetical: bool) -> Self {
        if alphabetical {
            SortScheme::Alphabetical
        } else {
            SortScheme::Priority
        }
    }
}

pub fn status_token(status: StatusType, scheme: SortScheme) -> &'static str {
    match scheme {
        SortScheme::Alphabetical => match status {
            StatusType::Offline => LOWEST_TOKEN,
            StatusType::Looking
            | StatusType::Online
            | StatusType::Busy
            | StatusType::Idle
            | StatusType::Away
            | StatusType::Dnd => "f",
        },
        SortScheme::Priority => match status {
            StatusType::Looking => "e",
            StatusType::Online => "f",
            StatusType::Busy => "g",
            StatusType::Idle => "h",
            StatusType::Away => "i",
            StatusType::Dnd => "y",
            StatusType::Offline => LOWEST_TOKEN,
        },
    }
}

pub fn list_token(list: ListKind) -> &'static str {
    match list {
        ListKind::Friend => "a",
        ListKind::Bookmark => "b",
        ListKind::Interested => "c",
        ListKind::Moderator => "d",
        ListKind::Ignored | ListKind::NotInterested => LOWEST_TOKEN,
    }
}

/// Tier token for `character`: offline and negatively listed characters sink
/// to the bottom, positively listed ones float above plain presence.
pub fn tier_token(
    character: &Character,
    roster: &dyn CharacterManager,
    scheme: SortScheme,
) -> &'static str {
    if character.status == StatusType::Offline {
        return LOWEST_TOKEN;
    }

    let name = character.name.as_str();
    let hidden = ListKind::NEGATIVE
        .into_iter()
        .any(|list| roster.is_on_list(name, list));
    if hidden {
        return LOWEST_TOKEN;
    }

    PRIORITY_LISTS
        .iter()
        .find(|list| roster.is_on_list(name, **list))
        .map(|list| list_token(*list))
        .unwrap_or_else(|| status_token(character.status, scheme))
}

pub fn sort_key(
    character: &Character,
    roster: &dyn CharacterManager,
    scheme: SortScheme,
) -> String {
    format!(
        "{}{}",
        tier_token(character, roster, scheme),
        character.name.to_lowercase()
    )
}

pub fn sort_characters(
    characters: &mut [Character],
    roster: &dyn CharacterManager,
    scheme: SortScheme,
) {
    characters.sort_by_cached_key(|character| sort_key(character, roster, scheme));
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
