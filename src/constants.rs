// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const TITLE_TRUNCATE_LENGTH: usize = 60;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const TOKEN_ENV_VAR: &str = "EDUFLEX_TOKEN";
pub const USER_AGENT: &str = concat!(clap::crate_name!(), "/", clap::crate_version!());

/// 课程正文中无法识别的结构化内容使用的占位文本
pub const CONTENT_PLACEHOLDER: &str = "Inget innehåll tillgängligt.";
pub const INSTRUCTIONS_HEADING: &str = "### Instruktioner";
pub const UPCOMING_BADGE: &str = "Kommande";
pub const LOCKED_BADGE: &str = "Låst";
pub const DEEP_LINK_PARAM: &str = "itemId";
pub const VIEW_LESSON_ACTIVITY: &str = "VIEW_LESSON";

pub const HELP_TOKEN_GUIDE: &str = r#"
1. 在浏览器中登录 EduFlex 平台。
2. 打开开发者工具:
   - 在 Windows / Linux 上: 按 F12 或 Ctrl+Shift+I
   - 在 macOS 上: 按 Cmd+Opt+I (⌘⌥I)
3. 切换到“控制台” (Console) 标签页。
4. 复制并粘贴以下代码到控制台，然后按 Enter 运行：
----------------------------------------------
copy(localStorage.getItem("token"))
----------------------------------------------
5. 此时 Token 已自动复制到剪贴板，可通过 --token 使用，
   或设置环境变量 EDUFLEX_TOKEN。"#;

pub mod api {
    /// URL 模板的键名，对应配置文件中的 `url_templates`
    pub mod templates {
        pub const COURSE_MATERIALS: &str = "COURSE_MATERIALS";
        pub const MY_LESSONS: &str = "MY_LESSONS";
        pub const CREATE_GLOBAL_LESSON: &str = "CREATE_GLOBAL_LESSON";
        pub const MATERIAL: &str = "MATERIAL";
        pub const COURSE_QUIZZES: &str = "COURSE_QUIZZES";
        pub const MY_QUIZZES: &str = "MY_QUIZZES";
        pub const QUIZ: &str = "QUIZ";
        pub const QUIZ_SUBMIT: &str = "QUIZ_SUBMIT";
        pub const ACTIVITY_LOG: &str = "ACTIVITY_LOG";
        pub const MY_SUBMISSION: &str = "MY_SUBMISSION";
    }

    pub mod form_fields {
        pub const TITLE: &str = "title";
        pub const CONTENT: &str = "content";
        pub const LINK: &str = "link";
        pub const TYPE: &str = "type";
        pub const AVAILABLE_FROM: &str = "availableFrom";
        pub const DIFFICULTY: &str = "difficulty";
        pub const ESTIMATED_TIME: &str = "estimatedTime";
        pub const PREREQUISITE_ID: &str = "prerequisiteId";
        pub const FILE: &str = "file";
    }

    pub const TENANT_HEADER: reqwest::header::HeaderName =
        reqwest::header::HeaderName::from_static("x-tenant-id");
}

pub mod extensions {
    pub const VIDEO: &[&str] = &["mp4", "webm", "ogg", "mov"];
    pub const IMAGE: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
    pub const EBOOK: &[&str] = &["epub"];
    pub const EDITABLE_DOCUMENT: &[&str] = &[
        "docx", "doc", "odt", "xlsx", "xls", "ods", "pptx", "ppt", "odp", "txt",
    ];
}
