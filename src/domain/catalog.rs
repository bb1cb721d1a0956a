use serde_json::json;

use super::{ChoiceOption, FormModel};

/// Id of the subscription source list. The first entry is the source the TV
/// application treats as active.
pub const CHANNELS_FIELD_ID: &str = "channels";

/// The settings catalog shipped with the TV application.
pub fn tv_settings_model() -> FormModel {
    FormModel::new()
        .add_ordered_list_field(
            CHANNELS_FIELD_ID,
            "Subscription sources",
            "Add http(s):// subscription links. Drag to reorder; the first source is the one in use.",
            "Enter a subscription link",
            Vec::new(),
        )
        .add_choice_field(
            "dataValueProxy",
            "Data proxy",
            "Enable when access to GitHub is restricted",
            [
                ChoiceOption::new("0", "Off"),
                ChoiceOption::new("1", "Proxy 1"),
                ChoiceOption::new("2", "Proxy 2"),
            ],
            Some("1".to_string()),
        )
        .add_choice_field(
            "timeoutSwitchLine",
            "Switch line on timeout",
            "Switch to the next line when playback has not started after this many seconds",
            ["5", "10", "15", "20", "30", "60"]
                .into_iter()
                .map(|secs| ChoiceOption::new(secs, format!("{secs}s"))),
            Some("15".to_string()),
        )
        .add_toggle_field(
            "leftRightSelect",
            "Up/down keys switch channels (TV only)",
            "Settings and line selection open with the left/right keys instead",
            true,
        )
        .add_choice_field(
            "fontScale",
            "Font size",
            "Scale factor applied to all text",
            [
                ChoiceOption::new("1", "1x"),
                ChoiceOption::new("1.2", "1.2x"),
                ChoiceOption::new("1.4", "1.4x"),
                ChoiceOption::new("1.6", "1.6x"),
                ChoiceOption::new("1.8", "1.8x"),
                ChoiceOption::new("2", "2x"),
            ],
            Some("1".to_string()),
        )
        .add_choice_field(
            "appFontFamily",
            "Font",
            "Use a custom font for the interface",
            FONTS
                .iter()
                .enumerate()
                .map(|(idx, font)| ChoiceOption::new(font_value(idx, font), font.name)),
            Some(font_value(0, &FONTS[0])),
        )
        .add_toggle_field(
            "bingBg",
            "Background images",
            "Show a daily background picture while nothing is playing",
            false,
        )
        .add_toggle_field(
            "autoUpdate",
            "Automatic updates",
            "Download and install new versions automatically",
            false,
        )
        .add_toggle_field(
            "lightVersionCheck",
            "Quiet update prompts",
            "Show update prompts on the player page as plain notices",
            true,
        )
}

struct FontEntry {
    name: &'static str,
    key: &'static str,
    file_type: &'static str,
}

const FONTS: [FontEntry; 8] = [
    FontEntry { name: "系统", key: "system", file_type: "ttf" },
    FontEntry { name: "楷体", key: "kaiti", file_type: "ttf" },
    FontEntry { name: "丸子体", key: "wanzi", file_type: "ttf" },
    FontEntry { name: "骚包体", key: "saobao", file_type: "otf" },
    FontEntry { name: "文艺体", key: "wenyi", file_type: "ttf" },
    FontEntry { name: "小薇体", key: "xiaowei", file_type: "otf" },
    FontEntry { name: "微软雅黑", key: "yahei", file_type: "ttf" },
    FontEntry { name: "汉仪正圆", key: "HYZY", file_type: "ttf" },
];

// The TV application decodes this compact JSON itself; key order matters.
fn font_value(idx: usize, font: &FontEntry) -> String {
    json!({
        "id": idx.to_string(),
        "font_name": font.name,
        "font_key": font.key,
        "font_type": font.file_type,
    })
    .to_string()
}
