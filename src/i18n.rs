use clap::ValueEnum;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Language {
    Zh,
    En,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }
}

/// (key, zh, en) rows covering the full UI string set.
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("countdown", "倒计时", "Countdown"),
    ("alarm", "闹钟", "Alarm"),
    ("timeUp", "时间到！", "Time's Up!"),
    ("alarmRinging", "闹钟正在响铃", "Alarm is ringing"),
    ("setDuration", "设置时间", "Set Duration"),
    ("start", "开始", "Start"),
    ("pause", "暂停", "Pause"),
    ("resume", "继续", "Resume"),
    ("reset", "重置", "Reset"),
    ("dismiss", "关闭", "Dismiss"),
    ("running", "运行中", "Running"),
    ("paused", "已暂停", "Paused"),
    ("alarmSetFor", "闹钟设置于", "Alarm set for"),
    ("alarmOff", "闹钟关闭", "Alarm Off"),
    ("currentTime", "当前时间", "Current Time"),
    ("stopAlarm", "停止闹钟", "Stop Alarm"),
    ("hours", "小时", "Hours"),
    ("minutes", "分钟", "Minutes"),
    ("seconds", "秒", "Seconds"),
    ("switchLanguage", "切换到英文", "切换到中文"),
    ("setAlarmTime", "设置闹钟时间", "Set Alarm Time"),
    ("wakeUp", "该起床了", "WAKE UP"),
    ("timePlaceholder", "时:分", "HH:MM"),
    ("setAlarm", "设置闹钟", "Set Alarm"),
    ("alarmActive", "闹钟已启用", "Alarm Active"),
    ("soundUnavailable", "音频设备不可用", "Audio device unavailable"),
];

/// Static key lookup; an unknown key falls back to the key itself so a
/// missing row degrades visibly instead of panicking.
pub fn translate(language: Language, key: &str) -> &str {
    for (row_key, zh, en) in TRANSLATIONS {
        if *row_key == key {
            return match language {
                Language::Zh => zh,
                Language::En => en,
            };
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_languages_cover_every_key() {
        for (key, zh, en) in TRANSLATIONS {
            assert!(!zh.is_empty(), "missing zh for {key}");
            assert!(!en.is_empty(), "missing en for {key}");
        }
    }

    #[test]
    fn looks_up_known_keys_per_language() {
        assert_eq!(translate(Language::En, "countdown"), "Countdown");
        assert_eq!(translate(Language::Zh, "countdown"), "倒计时");
        assert_eq!(translate(Language::En, "wakeUp"), "WAKE UP");
        assert_eq!(translate(Language::Zh, "wakeUp"), "该起床了");
    }

    #[test]
    fn unknown_key_falls_back_to_the_key() {
        assert_eq!(translate(Language::En, "noSuchKey"), "noSuchKey");
        assert_eq!(translate(Language::Zh, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn toggle_flips_between_the_two_languages() {
        assert_eq!(Language::Zh.toggle(), Language::En);
        assert_eq!(Language::En.toggle(), Language::Zh);
    }
}
