// src/workflows.rs

use crate::{
    AppContext,
    content::{
        LoadScope, LoadedContent,
        draft::MaterialDraft,
        materials::MaterialService,
        submissions::SubmissionService,
        visibility::{Visibility, quiz_visibility},
    },
    error::{AppError, AppResult},
    models::{ContentItem, Quiz},
    quiz::{QuizDraft, QuizRunner, QuizService},
    symbols, ui, utils,
    view::{self, Entry},
};
use colored::*;
use log::{debug, error, info, warn};

/// 加载内容，部分失败时只弹出一条提示
async fn load(context: &AppContext, scope: LoadScope) -> LoadedContent {
    let loaded = context.loader().load(scope).await;
    if let Some(toast) = loaded.toast_message() {
        ui::toast_error(&toast);
    }
    loaded
}

/// 列表模式。带 --item 时直接显示该条目。
pub(crate) async fn run_list(context: &AppContext) -> AppResult<()> {
    let scope = context.scope()?;
    let loaded = load(context, scope).await;
    ui::print_header(&scope.to_string());

    match context.args.item {
        Some(id) => show_entry_by_id(context, scope, &loaded, id).await,
        None => {
            view::print_listing(&loaded, context.args.role, context.now());
            Ok(())
        }
    }
}

/// 深度链接：从页面地址中读取课程和 itemId
pub(crate) async fn run_open(context: &AppContext, url: &str) -> AppResult<()> {
    let course_id = utils::course_id_from_url(url)?.or(context.args.course);
    let item_id = utils::item_id_from_url(url)?.or(context.args.item);
    debug!("深度链接解析结果: course={:?}, item={:?}", course_id, item_id);

    let scope = match course_id {
        Some(id) => LoadScope::Course(id),
        None => context.scope().map_err(|_| {
            AppError::UserInputError(format!("无法从链接 '{}' 中识别课程ID，请使用 --course 指定。", url))
        })?,
    };
    let loaded = load(context, scope).await;

    match item_id {
        Some(id) => show_entry_by_id(context, scope, &loaded, id).await,
        None => {
            ui::print_header(&scope.to_string());
            view::print_listing(&loaded, context.args.role, context.now());
            Ok(())
        }
    }
}

async fn show_entry_by_id(context: &AppContext, scope: LoadScope, loaded: &LoadedContent, id: i64) -> AppResult<()> {
    if let Some(item) = loaded.find_material(id) {
        return show_material(context, scope, item).await;
    }
    if let Some(quiz) = loaded.find_quiz(id) {
        return take_quiz(context, quiz).await;
    }
    // 找不到时退回到列表，和页面上忽略无效 itemId 一致
    warn!("{} 中没有ID为 {} 的内容", scope, id);
    println!("\n{} {}中没有ID为 {} 的内容。", *symbols::WARN, scope, id);
    view::print_listing(loaded, context.args.role, context.now());
    Ok(())
}

async fn show_material(context: &AppContext, scope: LoadScope, item: &ContentItem) -> AppResult<()> {
    view::print_material(item, context.args.role, context.now())?;
    if !context.args.role.is_teacher_like()
        && let Some(user_id) = context.args.user_id
    {
        context.materials().log_view(user_id, scope.course_id(), item.id).await;
    }
    Ok(())
}

/// 交互模式：反复选择条目查看或答题，空输入退出
pub(crate) async fn run_interactive(context: &AppContext) -> AppResult<()> {
    let scope = context.scope()?;
    ui::print_header("交互模式");
    println!("在此模式下，你可以逐一查看材料或参加测验。按 {} 可随时退出。", *symbols::CTRL_C);

    let loaded = load(context, scope).await;
    if loaded.is_empty() {
        println!("\n{} {}没有可显示的内容。", *symbols::INFO, scope);
        return Ok(());
    }

    let mut preselected = context.args.item;
    loop {
        let entry = match preselected.take() {
            Some(id) => match (loaded.find_material(id), loaded.find_quiz(id)) {
                (Some(_), _) => Entry::Material(id),
                (None, Some(_)) => Entry::Quiz(id),
                (None, None) => {
                    println!("\n{} 没有ID为 {} 的内容，请从列表中选择。", *symbols::WARN, id);
                    continue;
                }
            },
            None => {
                let entries = view::menu_entries(&loaded, context.args.role, context.now());
                let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
                let Some(index) = ui::selection_menu(
                    &labels,
                    &scope.to_string(),
                    "请输入编号查看内容 (直接按回车退出)",
                ) else {
                    break;
                };
                entries[index].1
            }
        };

        let result = match entry {
            Entry::Material(id) => match loaded.find_material(id) {
                Some(item) => show_material(context, scope, item).await,
                None => Ok(()),
            },
            Entry::Quiz(id) => match loaded.find_quiz(id) {
                Some(quiz) => take_quiz(context, quiz).await,
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            error!("交互模式查看 {:?} 失败: {}", entry, e);
            match e {
                AppError::UserInterrupt => continue,
                AppError::ContentLocked { .. } => println!("\n{} {}", *symbols::LOCK, e.to_string().yellow()),
                AppError::TokenInvalid | AppError::LicenseRequired => return Err(e),
                _ => ui::toast_error(&e.to_string()),
            }
        }
    }

    println!("\n{} 退出交互模式。", *symbols::INFO);
    Ok(())
}

async fn take_quiz(context: &AppContext, quiz: &Quiz) -> AppResult<()> {
    if quiz_visibility(quiz, context.args.role, context.now()) == Visibility::Locked {
        return Err(AppError::ContentLocked {
            title: quiz.title.clone(),
            available_from: quiz
                .available_from
                .as_ref()
                .map(utils::format_timestamp)
                .unwrap_or_default(),
        });
    }

    ui::print_header(&format!("Quiz: {}", quiz.title));
    if let Some(description) = quiz.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("{}", description);
    }
    if let Some(deadline) = view::quiz_deadline(quiz) {
        println!("{}", deadline.yellow());
    }
    if quiz.questions.is_empty() {
        println!("\n{} 该测验没有题目。", *symbols::INFO);
        return Ok(());
    }

    let mut runner = QuizRunner::new(quiz);
    let total = quiz.questions.len();
    for (i, question) in quiz.questions.iter().enumerate() {
        let options: Vec<String> = question.options.iter().map(|o| o.text.clone()).collect();
        let title = format!("Fråga {}/{}: {}", i + 1, total, question.text);
        match ui::selection_menu(&options, &title, "请输入选项编号 (直接按回车跳过)") {
            Some(index) => runner.select(question.id, question.options[index].id)?,
            None => debug!("题目 {} 被跳过", question.id),
        }
    }

    if !runner.is_complete() {
        let question = format!(
            "你只回答了 {}/{} 道题，确定要提交吗?",
            runner.answered_count(),
            total
        );
        if !ui::confirm(&question, false) {
            println!("\n{} 已放弃本次测验。", *symbols::INFO);
            return Ok(());
        }
    }

    let score = runner.finish(|s| info!("测验 {} 本地评分: {}/{}", quiz.id, s.score, s.max_score))?;
    let mut lines = vec![view::score_line(score), String::new()];
    lines.extend(view::review_lines(&runner));
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    ui::box_message(&quiz.title, &refs, |s| s.green());

    match context.args.user_id {
        Some(student_id) => match context.quizzes().submit(quiz.id, student_id, score).await {
            Ok(_) => ui::toast_success("结果已提交。"),
            Err(e) => {
                error!("提交测验 {} 失败: {}", quiz.id, e);
                ui::toast_error(&format!("结果提交失败: {}", e));
            }
        },
        None => println!("\n{} 未提供 --user-id，结果不会提交到服务器。", *symbols::INFO),
    }
    Ok(())
}

/// 把命令行中的材料字段覆盖到草稿上
fn apply_material_args(context: &AppContext, draft: &mut MaterialDraft) -> AppResult<()> {
    let args = &context.args;
    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if let Some(content) = &args.content {
        draft.content = content.clone();
    }
    if let Some(link) = &args.link {
        draft.link = Some(link.clone());
    }
    if let Some(content_type) = args.material_type {
        draft.content_type = content_type;
    }
    if let Some(raw) = &args.available_from {
        draft.available_from = Some(utils::parse_datetime_arg(raw)?);
    }
    if args.difficulty.is_some() {
        draft.difficulty = args.difficulty;
    }
    if args.estimated_time.is_some() {
        draft.estimated_time = args.estimated_time;
    }
    if args.prerequisite.is_some() {
        draft.prerequisite_id = args.prerequisite;
    }
    if args.file.is_some() {
        draft.file = args.file.clone();
    }
    Ok(())
}

fn print_saved(action: &str, item: &ContentItem) {
    ui::toast_success(&format!("材料已{}: #{} {}", action, item.id, item.title));
}

pub(crate) async fn run_create_material(context: &AppContext, title: &str) -> AppResult<()> {
    let mut draft = MaterialDraft::new(title);
    apply_material_args(context, &mut draft)?;
    draft.validate()?;

    let service = context.materials();
    let saved = match context.scope()? {
        LoadScope::Course(course_id) => service.create(course_id, context.args.user_id, draft).await?,
        LoadScope::Global { user_id } => service.create_global(user_id, draft).await?,
    };
    print_saved("创建", &saved);
    Ok(())
}

pub(crate) async fn run_update_material(context: &AppContext, id: i64) -> AppResult<()> {
    let scope = context.scope()?;
    let loaded = context.loader().load(scope).await;
    let Some(existing) = loaded.find_material(id) else {
        if let Some(toast) = loaded.toast_message() {
            ui::toast_error(&toast);
        }
        return Err(AppError::UserInputError(format!("{}中没有ID为 {} 的材料。", scope, id)));
    };

    let mut draft = MaterialDraft::from_item(existing);
    apply_material_args(context, &mut draft)?;
    draft.validate()?;

    let saved = context.materials().update(id, draft).await?;
    print_saved("更新", &saved);
    Ok(())
}

pub(crate) async fn run_delete_materials(context: &AppContext, ids: &[i64]) -> AppResult<()> {
    let service = context.materials();
    let mut failed = 0;
    for &id in ids {
        match service.delete(id).await {
            Ok(()) => println!("{} 材料 #{} 已删除。", *symbols::OK, id),
            Err(e @ (AppError::TokenInvalid | AppError::LicenseRequired)) => return Err(e),
            Err(e) => {
                failed += 1;
                error!("删除材料 {} 失败: {}", id, e);
                eprintln!("{} 删除材料 #{} 失败: {}", *symbols::ERROR, id, e.to_string().red());
            }
        }
    }
    if failed > 0 {
        Err(AppError::UserInputError(format!("{} 个材料删除失败。", failed)))
    } else {
        Ok(())
    }
}

/// 逐题录入测验，空题干结束录入
fn build_quiz_draft(title: &str) -> AppResult<QuizDraft> {
    let mut draft = QuizDraft::new(title);
    draft.description = ui::prompt("测验说明 (可留空)", None).map_err(|_| AppError::UserInterrupt)?;

    loop {
        let n = draft.questions.len() + 1;
        let text = ui::prompt(&format!("第 {} 题题干 (直接按回车结束录入)", n), None)
            .map_err(|_| AppError::UserInterrupt)?;
        if text.is_empty() {
            break;
        }
        ui::print_sub_header(&format!("第 {} 题", n));
        let question = draft.add_question(text);
        loop {
            let m = draft.questions[question].options.len() + 1;
            let option = ui::prompt(&format!("  选项 {} (直接按回车结束本题)", m), None)
                .map_err(|_| AppError::UserInterrupt)?;
            if option.is_empty() {
                break;
            }
            draft.add_option(question, option)?;
        }

        let options: Vec<String> = draft.questions[question]
            .options
            .iter()
            .map(|o| o.text.clone())
            .collect();
        if options.len() < 2 {
            println!("{} 每道题至少需要两个选项，本题已丢弃。", *symbols::WARN);
            draft.remove_question(question)?;
            continue;
        }
        if let Some(correct) = ui::selection_menu(&options, "请选择正确答案", "直接按回车使用第一个选项") {
            draft.mark_correct(question, correct)?;
        }
    }
    Ok(draft)
}

pub(crate) async fn run_create_quiz(context: &AppContext, title: &str) -> AppResult<()> {
    let LoadScope::Course(course_id) = context.scope()? else {
        return Err(AppError::UserInputError("测验只能创建在课程中，请使用 --course 指定课程。".to_string()));
    };
    if title.trim().is_empty() {
        return Err(AppError::Validation("测验标题不能为空".to_string()));
    }
    ui::print_header(&format!("创建测验: {}", title));
    let draft = build_quiz_draft(title)?;
    draft.validate()?;

    context.quizzes().create(course_id, context.args.user_id, &draft).await?;
    ui::toast_success(&format!(
        "测验 '{}' 已创建 ({} 道题)。",
        draft.title.trim(),
        draft.questions.len()
    ));
    Ok(())
}

pub(crate) async fn run_delete_quiz(context: &AppContext, id: i64) -> AppResult<()> {
    context.quizzes().delete(id).await?;
    println!("{} 测验 #{} 已删除。", *symbols::OK, id);
    Ok(())
}

/// 查看自己在某个作业中的提交与成绩
pub(crate) async fn run_my_submission(context: &AppContext, assignment_id: i64) -> AppResult<()> {
    let user_id = context
        .args
        .user_id
        .ok_or_else(|| AppError::Validation("查看提交需要提供 --user-id".to_string()))?;
    let submission = SubmissionService::new(context.http_client.clone())
        .my_submission(assignment_id, user_id)
        .await?;
    match submission {
        Some(submission) => {
            let lines = view::submission_lines(&submission);
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            let color: fn(ColoredString) -> ColoredString =
                if submission.is_graded() { |s| s.green() } else { |s| s.yellow() };
            ui::box_message(&format!("Uppgift #{}", assignment_id), &refs, color);
        }
        None => println!("\n{} 作业 #{} 尚未提交。", *symbols::INFO, assignment_id),
    }
    Ok(())
}

impl AppContext {
    fn materials(&self) -> MaterialService {
        MaterialService::new(self.http_client.clone())
    }

    fn quizzes(&self) -> QuizService {
        QuizService::new(self.http_client.clone())
    }
}
