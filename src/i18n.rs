// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 命令行输出与 ApiError 消息的本地化（zh-CN 默认,en 可选）
// rust_i18n::i18n! 宏在 lib.rs 中初始化
// ==========================================

/// 支持的语言（配置项 locale 的合法取值）
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 切换语言；不支持的语言代码保持当前语言并返回 false
pub fn set_locale(locale: &str) -> bool {
    if !SUPPORTED_LOCALES.contains(&locale) {
        tracing::warn!(locale, "不支持的语言代码,保持当前语言");
        return false;
    }
    rust_i18n::set_locale(locale);
    true
}

/// 翻译消息并替换 `%{name}` 占位符
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        result = result.replace(&format!("%{{{}}}", k), v);
    }
    result
}
