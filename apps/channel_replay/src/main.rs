use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use channel_core::{
    filters::{is_ding_message, meets_filters},
    load_settings,
    notify::{effective_level, notify_with_settings, Notification, NotificationSink},
    sort::sort_characters,
    AppSettings, ChannelCharacterManager, ChannelModel,
};
use clap::Parser;
use serde::Serialize;
use shared::{
    domain::{ChannelId, ChannelKind, Message, MessageId},
    settings::{GenderSettings, SearchSettings},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod script;

use script::{parse_script, ScriptStep};

#[derive(Parser, Debug)]
struct Cli {
    /// Optional TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON-lines script of channel events.
    #[arg(long)]
    script: PathBuf,
    #[arg(long, default_value = "ADH-replay")]
    channel: String,
    /// User count announced before the roster is populated.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    users: i64,
    /// Report as visible only messages whose poster or text contains this.
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    step: usize,
    messages: usize,
    ads: usize,
    unread: usize,
    unread_ads: usize,
    composite_unread: usize,
    needs_attention: bool,
    user_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roster: Option<Vec<&'a str>>,
}

/// Records the actions a notification would trigger.
#[derive(Default)]
struct ConsoleSink {
    actions: Vec<&'static str>,
}

impl NotificationSink for ConsoleSink {
    fn add_notification(&mut self, notification: Notification) {
        info!(
            channel = %notification.channel_id,
            title = %notification.title,
            body = %notification.body,
            "notification"
        );
        self.actions.push("notification");
    }

    fn flash_window(&mut self) {
        self.actions.push("flash");
    }

    fn play_sound(&mut self) {
        self.actions.push("sound");
    }

    fn show_toast(&mut self) {
        self.actions.push("toast");
    }
}

struct Replay {
    app: AppSettings,
    channel: ChannelModel,
    roster: Arc<ChannelCharacterManager>,
    search: SearchSettings,
    genders: GenderSettings,
}

impl Replay {
    fn run_step(&mut self, index: usize, step: ScriptStep) -> Result<()> {
        let mut visible = None;
        let mut actions = Vec::new();
        let mut roster_names = None;

        match step {
            ScriptStep::Message {
                id,
                kind,
                poster,
                text,
                interesting,
            } => {
                if !self.channel.mode().accepts(kind) {
                    warn!(message_id = id, kind = ?kind, "channel mode rejects message");
                    return Ok(());
                }
                let message = Message::new(MessageId(id), kind, poster, text);
                let (is_visible, sink_actions) = self.deliver(message, interesting);
                visible = Some(is_visible);
                actions = sink_actions;
            }
            ScriptStep::Select => self.channel.set_selected(true),
            ScriptStep::Deselect => self.channel.set_selected(false),
            ScriptStep::SignOn { character } => {
                self.roster.sign_on(character);
            }
            ScriptStep::SignOff { name } => {
                self.roster.sign_off(&name);
            }
            ScriptStep::List { name, list } => {
                self.roster.add_to_list(&name, list);
            }
            ScriptStep::Describe { text } => self.channel.set_description(text),
            ScriptStep::Resize { backlog_max } => self.channel.set_backlog_max(backlog_max),
            ScriptStep::Settings { settings } => self.channel.set_settings(settings),
            ScriptStep::Roster => {
                let mut characters = self.roster.characters();
                sort_characters(&mut characters, &*self.roster, self.app.sort_scheme());
                let names: Vec<String> = characters.into_iter().map(|c| c.name).collect();
                roster_names = Some(names);
            }
        }

        let roster_refs = roster_names
            .as_ref()
            .map(|names| names.iter().map(String::as_str).collect());
        let snapshot = Snapshot {
            step: index + 1,
            messages: self.channel.messages().len(),
            ads: self.channel.ads().len(),
            unread: self.channel.unread(),
            unread_ads: self.channel.unread_ads(),
            composite_unread: self.channel.composite_unread_count(),
            needs_attention: self.channel.needs_attention(),
            user_count: self.channel.user_count(),
            visible,
            actions,
            roster: roster_refs,
        };
        println!("{}", serde_json::to_string(&snapshot)?);
        Ok(())
    }

    fn deliver(&mut self, message: Message, interesting: bool) -> (bool, Vec<&'static str>) {
        let visible = meets_filters(
            &message,
            &self.genders,
            &self.search,
            &*self.roster,
            &self.channel,
        );

        let settings = self.channel.settings();
        let ding_terms = settings.ding_terms(&self.app.ding_terms);
        let is_ding = is_ding_message(&message, settings, ding_terms);
        let level = effective_level(settings, message.kind, interesting, is_ding);
        let notification = Notification::new(
            self.channel.id().clone(),
            self.channel.title().to_string(),
            format!("{}: {}", message.poster.name, message.text),
        );

        let selected = self.channel.is_selected();
        if is_ding && !selected {
            self.channel.set_needs_attention_override(true);
        }
        self.channel.add_message(message, interesting || is_ding);

        let mut sink = ConsoleSink::default();
        if !selected {
            notify_with_settings(&mut sink, notification, level);
        }
        (visible, sink.actions)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = load_settings(cli.config.as_deref())?;
    let raw = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read script '{}'", cli.script.display()))?;
    let steps = parse_script(&raw)?;

    let roster = Arc::new(ChannelCharacterManager::new());
    let channel = ChannelModel::new(
        ChannelId::new(cli.channel.clone()),
        cli.channel,
        ChannelKind::Public,
        cli.users,
        &app,
    )?
    .with_roster(roster.clone());

    let mut replay = Replay {
        app,
        channel,
        roster,
        search: SearchSettings::with_search(cli.search),
        genders: GenderSettings::default(),
    };

    for (index, step) in steps.into_iter().enumerate() {
        replay.run_step(index, step)?;
    }

    Ok(())
}
