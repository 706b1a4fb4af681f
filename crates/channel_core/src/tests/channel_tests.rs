use super::*;
use shared::domain::{Character, MessageId};

fn app(backlog_max: usize) -> AppSettings {
    AppSettings::default().with_backlog_max(backlog_max)
}

fn channel(backlog_max: usize) -> ChannelModel {
    ChannelModel::new(
        ChannelId::new("ADH-frontpage"),
        "Frontpage",
        ChannelKind::Public,
        0,
        &app(backlog_max),
    )
    .expect("channel")
}

fn chat(id: u64) -> Message {
    Message::normal(id, Character::new("alice"), format!("chat {id}"))
}

fn ad(id: u64) -> Message {
    Message::ad(id, Character::new("bob"), format!("ad {id}"))
}

fn message_ids(backlog: &Backlog) -> Vec<u64> {
    backlog.iter().map(|m| m.id.0).collect()
}

#[test]
fn rejects_negative_user_count() {
    let err = ChannelModel::new(
        ChannelId::new("ADH-x"),
        "x",
        ChannelKind::Private,
        -1,
        &AppSettings::default(),
    )
    .expect_err("negative users");
    assert_eq!(err, ChannelError::NegativeUserCount { users: -1 });
}

#[test]
fn rejects_empty_channel_id() {
    let err = ChannelModel::new(
        ChannelId::new(""),
        "x",
        ChannelKind::Private,
        0,
        &AppSettings::default(),
    )
    .expect_err("empty id");
    assert_eq!(err, ChannelError::EmptyChannelId);
}

#[test]
fn unselected_overflow_keeps_newest_three() {
    let mut channel = channel(3);
    for id in 1..=5 {
        channel.add_message(chat(id), false);
    }

    assert_eq!(message_ids(channel.messages()), vec![3, 4, 5]);
    assert_eq!(channel.last_read_count(), 0);
    assert_eq!(channel.unread(), 3);
}

#[test]
fn eviction_decrements_last_read_once_per_overflow() {
    let mut channel = channel(3);
    channel.set_selected(true);
    for id in 1..=3 {
        channel.add_message(chat(id), false);
    }
    channel.set_selected(false);
    assert_eq!(channel.last_read_count(), 3);

    channel.add_message(chat(4), false);
    channel.add_message(chat(5), false);

    assert_eq!(message_ids(channel.messages()), vec![3, 4, 5]);
    assert_eq!(channel.last_read_count(), 1);
    assert_eq!(channel.unread(), 2);
}

#[test]
fn ads_and_messages_are_bounded_independently() {
    let mut channel = channel(2);
    for id in 1..=4 {
        channel.add_message(chat(id), false);
        channel.add_message(ad(100 + id), false);
    }

    assert_eq!(message_ids(channel.messages()), vec![3, 4]);
    assert_eq!(message_ids(channel.ads()), vec![103, 104]);
}

#[test]
fn selected_channel_reads_new_messages_immediately() {
    let mut channel = channel(10);
    channel.set_selected(true);
    channel.add_message(chat(1), true);
    channel.add_message(ad(2), true);

    assert_eq!(channel.unread(), 0);
    assert_eq!(channel.unread_ads(), 0);
    assert_eq!(channel.composite_unread_count(), 0);
    assert!(!channel.unread_contains_interesting());
}

#[test]
fn selecting_marks_ads_read() {
    let mut channel = channel(10);
    for id in 1..=4 {
        channel.add_message(ad(id), false);
    }
    assert_eq!(channel.unread_ads(), 4);

    channel.set_selected(true);

    assert_eq!(channel.unread_ads(), 0);
    assert_eq!(channel.last_read_ad_count(), 4);
}

#[test]
fn composite_unread_sums_both_backlogs() {
    let mut channel = channel(10);
    channel.add_message(chat(1), false);
    channel.add_message(chat(2), false);
    channel.add_message(ad(3), false);

    assert_eq!(channel.composite_unread_count(), 3);
}

#[test]
fn override_wins_over_no_notification_when_unselected() {
    let mut channel = channel(10).with_settings(ChannelSettings {
        message_notify_level: NotifyLevel::NoNotification,
        ..ChannelSettings::default()
    });
    channel.set_needs_attention_override(true);

    assert!(channel.needs_attention());
}

#[test]
fn override_is_ignored_while_selected() {
    let mut channel = channel(10).with_settings(ChannelSettings {
        message_notify_level: NotifyLevel::NoNotification,
        ..ChannelSettings::default()
    });
    channel.set_selected(true);
    channel.set_needs_attention_override(true);

    assert!(!channel.needs_attention());
}

#[test]
fn no_notification_short_circuits_interest_and_ads() {
    let mut channel = channel(10).with_settings(ChannelSettings {
        message_notify_level: NotifyLevel::NoNotification,
        flash_interval: 1,
        ..ChannelSettings::default()
    });
    channel.add_message(chat(1), true);
    channel.add_message(ad(2), false);

    assert!(!channel.needs_attention());
}

#[test]
fn only_for_interesting_ignores_ad_flash_interval() {
    let mut channel = channel(10).with_settings(ChannelSettings {
        message_notify_only_for_interesting: true,
        flash_interval: 1,
        ..ChannelSettings::default()
    });
    channel.add_message(ad(1), false);
    channel.add_message(ad(2), false);
    assert!(!channel.needs_attention());

    channel.add_message(chat(3), true);
    assert!(channel.needs_attention());
}

#[test]
fn unread_ads_reaching_flash_interval_need_attention() {
    let mut channel = channel(10).with_settings(ChannelSettings {
        flash_interval: 3,
        ..ChannelSettings::default()
    });
    channel.add_message(ad(1), false);
    channel.add_message(ad(2), false);
    assert!(!channel.needs_attention());

    channel.add_message(ad(3), false);
    assert!(channel.needs_attention());
}

#[test]
fn interesting_message_needs_attention_until_selected() {
    let mut channel = channel(10).with_settings(ChannelSettings {
        flash_interval: 100,
        ..ChannelSettings::default()
    });
    channel.add_message(chat(1), false);
    assert!(!channel.needs_attention());

    channel.add_message(chat(2), true);
    assert!(channel.needs_attention());

    channel.set_selected(true);
    assert!(!channel.needs_attention());
    channel.set_selected(false);
    assert!(!channel.needs_attention());
}

#[test]
fn interest_is_not_recorded_when_append_evicts() {
    let mut channel = channel(1).with_settings(ChannelSettings {
        flash_interval: 100,
        ..ChannelSettings::default()
    });
    channel.add_message(chat(1), false);
    channel.add_message(chat(2), true);

    assert!(!channel.unread_contains_interesting());
}

#[test]
fn user_count_prefers_live_roster() {
    let roster = Arc::new(ChannelCharacterManager::new());
    let mut channel = ChannelModel::new(
        ChannelId::new("ADH-x"),
        "x",
        ChannelKind::Public,
        12,
        &AppSettings::default(),
    )
    .expect("channel")
    .with_roster(roster.clone());

    assert_eq!(channel.user_count(), 12);

    roster.sign_on(Character::new("alice"));
    roster.sign_on(Character::new("bob"));
    assert_eq!(channel.user_count(), 2);
    assert_eq!(channel.display_number(), 2);

    roster.clear();
    channel.set_user_count(7);
    assert_eq!(channel.user_count(), 7);
}

#[test]
fn description_change_is_published() {
    let mut channel = channel(10);
    let events = channel.subscribe();

    channel.set_description("Welcome!");

    assert_eq!(channel.description(), "Welcome!");
    assert_eq!(
        events.try_recv().expect("event"),
        ChannelEvent::PropertyChanged("description")
    );
}

#[test]
fn add_message_publishes_eviction_addition_and_counters() {
    let mut channel = channel(1);
    channel.add_message(chat(1), false);
    let events = channel.subscribe();

    channel.add_message(chat(2), false);

    let received: Vec<ChannelEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            ChannelEvent::MessageEvicted {
                kind: MessageKind::Normal,
                id: MessageId(1)
            },
            ChannelEvent::MessageAdded {
                kind: MessageKind::Normal,
                id: MessageId(2)
            },
            ChannelEvent::CountersChanged {
                unread: 1,
                unread_ads: 0,
                composite_unread: 1,
                needs_attention: false,
            },
        ]
    );
}

#[test]
fn only_the_home_channel_stays_open() {
    let mut home = ChannelModel::new(
        ChannelId::new(shared::domain::HOME_CHANNEL_ID),
        "Home",
        ChannelKind::Utility,
        0,
        &AppSettings::default(),
    )
    .expect("home");
    home.set_selected(true);
    assert!(!home.can_close());

    let mut other = channel(10);
    assert!(!other.can_close());
    other.set_selected(true);
    assert!(other.can_close());
}

#[test]
fn clearing_resets_counters() {
    let mut channel = channel(10);
    channel.add_message(chat(1), false);
    channel.add_message(ad(2), false);

    channel.clear_messages();
    channel.clear_ads();

    assert!(channel.messages().is_empty());
    assert!(channel.ads().is_empty());
    assert_eq!(channel.last_read_count(), 0);
    assert_eq!(channel.last_read_ad_count(), 0);
    assert_eq!(channel.composite_unread_count(), 0);
}

#[test]
fn shrinking_capacity_clamps_counters() {
    let mut channel = channel(10);
    channel.set_selected(true);
    for id in 1..=6 {
        channel.add_message(chat(id), false);
        channel.add_message(ad(100 + id), false);
    }
    channel.set_selected(false);
    for id in 7..=8 {
        channel.add_message(chat(id), false);
    }

    channel.set_backlog_max(3);

    assert_eq!(channel.backlog_max(), 3);
    assert_eq!(message_ids(channel.messages()), vec![6, 7, 8]);
    assert_eq!(channel.last_read_count(), 1);
    assert_eq!(channel.unread(), 2);
    assert_eq!(message_ids(channel.ads()), vec![104, 105, 106]);
    assert_eq!(channel.last_read_ad_count(), 3);
    assert_eq!(channel.unread_ads(), 0);
}

#[test]
fn mode_reports_accepted_kinds() {
    let channel = channel(10).with_mode(ChannelMode::Ads);
    assert!(channel.mode().accepts(MessageKind::Ad));
    assert!(!channel.mode().accepts(MessageKind::Normal));
}
