//! @ai:module:intent Map code fence language tags to their comment syntax
//! @ai:module:layer domain
//! @ai:module:public_api Language, detect_language, comment_prefix
//! @ai:module:stateless true

/// @ai:intent A code fence language with a known line-comment syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Shell,
    Python,
    Yaml,
    Toml,
    Rust,
    TypeScript,
    JavaScript,
    Go,
    Java,
    C,
    Cpp,
    Sql,
    Lua,
}

impl Language {
    const ALL: [Language; 13] = [
        Language::Shell,
        Language::Python,
        Language::Yaml,
        Language::Toml,
        Language::Rust,
        Language::TypeScript,
        Language::JavaScript,
        Language::Go,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::Sql,
        Language::Lua,
    ];

    /// @ai:intent Get the line comment prefix for this language
    /// @ai:effects pure
    pub fn line_comment(&self) -> &'static str {
        match self {
            Language::Shell | Language::Python | Language::Yaml | Language::Toml => "#",
            Language::Rust
            | Language::TypeScript
            | Language::JavaScript
            | Language::Go
            | Language::Java
            | Language::C
            | Language::Cpp => "//",
            Language::Sql | Language::Lua => "--",
        }
    }

    /// @ai:intent Get the fence tags that name this language
    /// @ai:effects pure
    pub fn fence_tags(&self) -> &[&str] {
        match self {
            Language::Shell => &["bash", "sh", "shell", "zsh", "console"],
            Language::Python => &["python", "py"],
            Language::Yaml => &["yaml", "yml"],
            Language::Toml => &["toml"],
            Language::Rust => &["rust", "rs"],
            Language::TypeScript => &["typescript", "ts", "tsx"],
            Language::JavaScript => &["javascript", "js", "jsx", "json5"],
            Language::Go => &["go", "golang"],
            Language::Java => &["java", "kotlin"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "c++", "cc", "hpp"],
            Language::Sql => &["sql"],
            Language::Lua => &["lua"],
        }
    }
}

/// @ai:intent Detect the language named by a code fence tag
/// @ai:example ("bash") -> Some(Shell)
/// @ai:example ("text") -> None
/// @ai:effects pure
pub fn detect_language(tag: &str) -> Option<Language> {
    let tag = tag.trim().to_lowercase();
    Language::ALL
        .into_iter()
        .find(|lang| lang.fence_tags().contains(&tag.as_str()))
}

/// @ai:intent Line comment prefix for a fence tag, "#" when unknown
/// @ai:effects pure
pub fn comment_prefix(tag: &str) -> &'static str {
    detect_language(tag).map_or("#", |lang| lang.line_comment())
}

/// @ai:intent All distinct line comment prefixes
/// @ai:effects pure
pub fn known_comment_prefixes() -> Vec<&'static str> {
    let mut prefixes: Vec<&'static str> = Vec::new();
    for lang in Language::ALL {
        let prefix = lang.line_comment();
        if !prefixes.contains(&prefix) {
            prefixes.push(prefix);
        }
    }
    prefixes
}
