// src/cli.rs

use crate::models::{ContentType, Role};
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&[
            "interactive", "list", "open", "create_material", "update_material",
            "delete_material", "create_quiz", "delete_quiz", "my_submission", "token_help",
            "save_token",
        ]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 启动交互式会话，逐一查看课程内容或参加测验
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub interactive: bool,
    /// 列出课程 (--course) 或个人 (--global) 的全部材料与测验
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub list: bool,
    /// 打开带有 itemId 参数的课程页面链接，直接显示对应内容
    #[arg(long, value_name = "URL", help_heading = "Mode")]
    pub open: Option<String>,
    /// 创建新的课程材料，参数为标题
    #[arg(long, value_name = "TITLE", help_heading = "Mode")]
    pub create_material: Option<String>,
    /// 修改指定ID的课程材料，未提供的字段保持原值
    #[arg(long, value_name = "ID", help_heading = "Mode")]
    pub update_material: Option<i64>,
    /// 删除指定ID的课程材料 (可用逗号分隔多个ID)
    #[arg(long, value_name = "IDS", value_delimiter = ',', help_heading = "Mode")]
    pub delete_material: Option<Vec<i64>>,
    /// 逐题录入并创建新的测验，参数为标题
    #[arg(long, value_name = "TITLE", help_heading = "Mode")]
    pub create_quiz: Option<String>,
    /// 删除指定ID的测验
    #[arg(long, value_name = "ID", help_heading = "Mode")]
    pub delete_quiz: Option<i64>,
    /// 查看自己在指定作业中的提交、成绩与评语 (需配合 --user-id)
    #[arg(long, value_name = "ASSIGNMENT_ID", requires = "user_id", help_heading = "Mode")]
    pub my_submission: Option<i64>,
    /// 显示如何获取 Access Token 的指南并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub token_help: bool,
    /// 将 Access Token 保存到本地配置文件
    #[arg(long, value_name = "TOKEN", help_heading = "Mode")]
    pub save_token: Option<String>,

    // --- 范围选项 (Scope) ---
    /// 课程ID
    #[arg(short, long, value_name = "ID", help_heading = "Scope")]
    pub course: Option<i64>,
    /// 使用个人内容库而不是某个课程 (需配合 --user-id)
    #[arg(short, long, action = clap::ArgAction::SetTrue, conflicts_with = "course", requires = "user_id", help_heading = "Scope")]
    pub global: bool,
    /// 当前用户ID
    #[arg(short, long, value_name = "ID", help_heading = "Scope")]
    pub user_id: Option<i64>,
    /// 当前用户角色，决定排期内容是锁定还是仅标记为“Kommande”
    #[arg(short, long, value_enum, default_value_t = Role::Student, help_heading = "Scope")]
    pub role: Role,
    /// 直接选中指定ID的内容 (与页面链接中的 itemId 相同)
    #[arg(long, value_name = "ID", help_heading = "Scope")]
    pub item: Option<i64>,

    // --- 材料编辑选项 (Material) ---
    /// [修改模式] 新标题
    #[arg(long, help_heading = "Material")]
    pub title: Option<String>,
    /// [创建/修改] 材料正文
    #[arg(long, help_heading = "Material")]
    pub content: Option<String>,
    /// [创建/修改] 外部链接 (例如 YouTube 视频)
    #[arg(long, help_heading = "Material")]
    pub link: Option<String>,
    /// [创建/修改] 材料类型 (默认 lesson)
    #[arg(long, value_enum, help_heading = "Material")]
    pub material_type: Option<ContentType>,
    /// [创建/修改] 开放时间，格式 YYYY-MM-DDTHH:MM[:SS]
    #[arg(long, value_name = "DATETIME", help_heading = "Material")]
    pub available_from: Option<String>,
    /// [创建/修改] 难度等级 (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5), help_heading = "Material")]
    pub difficulty: Option<u8>,
    /// [创建/修改] 预计学习时长 (分钟)
    #[arg(long, value_name = "MINUTES", help_heading = "Material")]
    pub estimated_time: Option<u32>,
    /// [创建/修改] 前置材料ID
    #[arg(long, value_name = "ID", help_heading = "Material")]
    pub prerequisite: Option<i64>,
    /// [创建/修改] 附件文件
    #[arg(long, value_name = "FILE", help_heading = "Material")]
    pub file: Option<PathBuf>,

    // --- 连接选项 (Options) ---
    /// 提供访问令牌 (Access Token)，优先级最高
    #[arg(long, help_heading = "Options")]
    pub token: Option<String>,
    /// 服务器地址，覆盖配置文件中的 base_url
    #[arg(long, value_name = "URL", help_heading = "Options")]
    pub server: Option<String>,
    /// 租户标识，作为 X-Tenant-ID 请求头发送
    #[arg(long, help_heading = "Options")]
    pub tenant: Option<String>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

const REDACTED: &str = "***";

impl Cli {
    /// 用于日志输出的副本，Token 一律打码
    pub fn redacted(&self) -> Cli {
        let mask = |v: &Option<String>| v.as_ref().map(|_| REDACTED.to_string());
        Cli {
            token: mask(&self.token),
            save_token: mask(&self.save_token),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_hides_tokens() {
        let cli = Cli::parse_from(["eduflex-cli", "--list", "-c", "5", "--token", "hemlig-token-123"]);
        let logged = format!("{:?}", cli.redacted());
        assert!(!logged.contains("hemlig-token-123"));
        assert!(logged.contains(REDACTED));
        assert_eq!(cli.token.as_deref(), Some("hemlig-token-123"));

        let cli = Cli::parse_from(["eduflex-cli", "--save-token", "sparad-token-456"]);
        assert!(!format!("{:?}", cli.redacted()).contains("sparad-token-456"));
    }

    #[test]
    fn test_my_submission_requires_user_id() {
        assert!(Cli::try_parse_from(["eduflex-cli", "--my-submission", "3"]).is_err());
        let cli = Cli::try_parse_from(["eduflex-cli", "--my-submission", "3", "-u", "7"]).unwrap();
        assert_eq!(cli.my_submission, Some(3));
    }
}
