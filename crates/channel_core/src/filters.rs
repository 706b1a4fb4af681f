use shared::{
    domain::{Character, ListKind, Message},
    settings::{ChannelSettings, GenderSettings, SearchSettings},
};

use crate::{channel::ChannelModel, roster::CharacterManager};

/// Decides whether a ding term occurs in a piece of text.
pub trait TermMatcher {
    fn matches(&self, haystack: &str, term: &str) -> bool;
}

fn any_term_matches(matcher: &dyn TermMatcher, haystack: &str, terms: &[&str]) -> bool {
    terms
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .any(|term| matcher.matches(haystack, term))
}

/// Case-insensitive substring matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveMatcher;

impl TermMatcher for CaseInsensitiveMatcher {
    fn matches(&self, haystack: &str, term: &str) -> bool {
        contains_ignore_case(haystack, term)
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn meets_search_filter(message: &Message, search: &SearchSettings) -> bool {
    let needle = search.search_string.as_str();
    contains_ignore_case(&message.poster.name, needle)
        || contains_ignore_case(&message.text, needle)
}

pub fn meets_gender_filter(character: &Character, genders: &GenderSettings) -> bool {
    genders.allowed.contains(&character.gender)
}

/// List rules: negative lists hide unless shown, and with `show_only_listed`
/// the character must be on an enabled positive list. Moderator status comes
/// from the channel's own roster, every other list from `roster`.
pub fn meets_list_filter(
    character: &Character,
    search: &SearchSettings,
    roster: &dyn CharacterManager,
    channel: &ChannelModel,
) -> bool {
    let name = character.name.as_str();

    for list in ListKind::NEGATIVE {
        if !search.shows_list(list) && roster.is_on_list(name, list) {
            return false;
        }
    }

    if !search.show_only_listed {
        return true;
    }

    let on_shown_list = [ListKind::Friend, ListKind::Bookmark, ListKind::Interested]
        .into_iter()
        .any(|list| search.shows_list(list) && roster.is_on_list(name, list));

    on_shown_list
        || (search.shows_list(ListKind::Moderator)
            && channel.roster().is_on_list(name, ListKind::Moderator))
}

pub fn meets_filters(
    message: &Message,
    genders: &GenderSettings,
    search: &SearchSettings,
    roster: &dyn CharacterManager,
    channel: &ChannelModel,
) -> bool {
    if !meets_search_filter(message, search) {
        return false;
    }

    meets_gender_filter(&message.poster, genders)
        && meets_list_filter(&message.poster, search, roster, channel)
}

pub fn is_ding_message<'a, I>(message: &Message, settings: &ChannelSettings, ding_terms: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    is_ding_message_with(message, settings, ding_terms, &CaseInsensitiveMatcher)
}

/// Matches ding terms against the entity-decoded text and, when enabled, the
/// poster's name.
pub fn is_ding_message_with<'a, I>(
    message: &Message,
    settings: &ChannelSettings,
    ding_terms: I,
    matcher: &dyn TermMatcher,
) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let terms: Vec<&str> = ding_terms.into_iter().collect();
    if terms.is_empty() {
        return false;
    }

    let decoded = html_escape::decode_html_entities(&message.text);
    if any_term_matches(matcher, &decoded, &terms) {
        return true;
    }

    settings.notify_includes_character_names
        && any_term_matches(matcher, &message.poster.name, &terms)
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
