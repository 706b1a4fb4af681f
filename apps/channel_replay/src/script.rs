use anyhow::{Context, Result};
use serde::Deserialize;
use shared::{
    domain::{Character, ListKind, MessageKind},
    settings::ChannelSettings,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Message {
        id: u64,
        #[serde(default)]
        kind: MessageKind,
        poster: Character,
        text: String,
        #[serde(default)]
        interesting: bool,
    },
    Select,
    Deselect,
    SignOn {
        character: Character,
    },
    SignOff {
        name: String,
    },
    List {
        name: String,
        list: ListKind,
    },
    Describe {
        text: String,
    },
    Resize {
        backlog_max: usize,
    },
    Settings {
        settings: ChannelSettings,
    },
    Roster,
}

/// Parses one step per non-empty line; `#` starts a comment line.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptStep>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line.trim())
                .with_context(|| format!("invalid script step on line {}", index + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::settings::NotifyLevel;

    #[test]
    fn parses_steps_and_skips_comments() {
        let raw = r#"
# warm-up
{"op":"message","id":1,"kind":"ad","poster":{"name":"alice"},"text":"hi"}
{"op":"select"}
{"op":"settings","settings":{"message_notify_level":"notification_and_sound"}}
"#;
        let steps = parse_script(raw).expect("script");

        assert_eq!(steps.len(), 3);
        assert!(matches!(
            &steps[0],
            ScriptStep::Message { id: 1, kind: MessageKind::Ad, interesting: false, .. }
        ));
        assert_eq!(steps[1], ScriptStep::Select);
        match &steps[2] {
            ScriptStep::Settings { settings } => assert_eq!(
                settings.message_notify_level,
                NotifyLevel::NotificationAndSound
            ),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn reports_line_of_bad_step() {
        let err = parse_script("{\"op\":\"select\"}\n{\"op\":\"explode\"}").expect_err("bad op");
        assert!(err.to_string().contains("line 2"));
    }
}
