//! Minimal string lookup. Missing keys come back as the key itself.

fn zh_cn(key: &str) -> Option<&'static str> {
    let text = match key {
        "home.title" => "首页",
        "library.title" => "词库",
        "library.count" => "共 {{count}} 个单词",
        "practice.empty" => "词库为空，请先添加单词",
        "practice.prompt" => "{{position}} / {{total}}  {{kanji}}  ({{romaji}})",
        "practice.cheat_detected" => "检测到异常输入速度，本次练习成绩无效",
        "stats.title" => "练习完成",
        "stats.wpm" => "速度 (WPM)",
        "stats.accuracy" => "正确率",
        "add_word.title" => "添加新单词",
        "add_word.saved" => "已添加：{{kanji}}",
        "add_word.failed" => "添加单词失败",
        "add_word.missing" => "请填写：{{field}}",
        "add_word.suggestions" => "推荐单词",
        "enrich.unavailable" => "AI 填充不可用",
        "enrich.failed" => "AI 生成失败",
        "words.loaded" => "已加载 {{count}} 个单词",
        "input.unknown_command" => "未知命令：{{line}}",
        _ => return None,
    };
    Some(text)
}

pub fn t(key: &str, params: &[(&str, String)], locale: &str) -> String {
    let found = match locale {
        "zh-CN" => zh_cn(key),
        // ja-JP has no table yet
        _ => None,
    };

    let Some(text) = found else {
        return key.to_string();
    };

    params
        .iter()
        .fold(text.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{{{name}}}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_params() {
        assert_eq!(
            t("words.loaded", &[("count", "6".to_string())], "zh-CN"),
            "已加载 6 个单词"
        );
    }

    #[test]
    fn missing_key_or_locale_returns_key() {
        assert_eq!(t("nope.nothing", &[], "zh-CN"), "nope.nothing");
        assert_eq!(t("stats.wpm", &[], "ja-JP"), "stats.wpm");
    }
}
