use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::{Table, Tabled};
use task_cli::cli::{Cli, Command};
use task_core::api_client::{ApiClient, TaskDraft, parse_task_id};
use task_core::error::AppError;
use task_core::form::{self, TaskFormInput};
use task_core::model::{Task, TaskStatus};
use task_core::page::{TaskPage, paginate};
use task_core::{config, datetime};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Due date")]
    due_date: String,
}

fn print_page_table(page: &TaskPage) -> Result<(), AppError> {
    if page.total_pages == 0 {
        println!("No tasks found.");
        return Ok(());
    }
    if page.tasks.is_empty() {
        println!("No tasks on page {} of {}.", page.page, page.total_pages);
        return Ok(());
    }

    let mut rows = Vec::with_capacity(page.tasks.len());
    for task in &page.tasks {
        rows.push(TaskRow {
            id: task.id,
            title: task.title.clone(),
            status: task.status.label(),
            due_date: datetime::format_due_date(&task.due_date)?,
        });
    }
    println!("{}", Table::new(rows));
    println!("Page {} of {}", page.page, page.total_pages);
    Ok(())
}

fn print_page_json(page: &TaskPage) {
    let json = serde_json::json!({
        "tasks": page.tasks,
        "page": page.page,
        "total_pages": page.total_pages,
    });
    println!("{json}");
}

fn print_task_plain(task: &Task) -> Result<(), AppError> {
    println!("ID: {}", task.id);
    println!("Title: {}", task.title);
    println!("Status: {}", task.status.label());
    println!("Due date: {}", datetime::format_due_date(&task.due_date)?);
    if let Some(description) = task.description.as_deref()
        && !description.is_empty()
    {
        println!("Description: {description}");
    }
    Ok(())
}

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "status": task.status,
        "due_date": task.due_date,
        "created_at": task.created_at,
    });
    println!("{json}");
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn validated_draft(input: &TaskFormInput, status: TaskStatus) -> Result<TaskDraft, AppError> {
    let errors = form::validate(input);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let due_date = datetime::assemble_due_date(
        &input.due_year,
        &input.due_month,
        &input.due_day,
        &input.due_hour,
        &input.due_minute,
    )?;

    Ok(TaskDraft {
        title: input.title.trim().to_string(),
        description: optional_text(&input.description),
        status,
        due_date,
    })
}

fn show_task(client: &ApiClient, raw_id: &str, json: bool) -> Result<(), AppError> {
    let id = parse_task_id(raw_id)?;
    let task = client.get_task(id)?;
    if json {
        print_task_json(&task);
    } else {
        print_task_plain(&task)?;
    }
    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let loaded = config::load();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: {err}");
    }
    let env_url = std::env::var(config::API_URL_ENV_VAR).ok();
    let api_url = config::resolve_api_url(cli.api_url.as_deref(), env_url.as_deref(), &loaded.config);
    let client = ApiClient::new(&api_url)?;

    match cli.command {
        Command::New {
            title,
            description,
            status,
            due_day,
            due_month,
            due_year,
            due_hour,
            due_minute,
        } => {
            let input = TaskFormInput {
                title,
                description,
                due_day,
                due_month,
                due_year,
                due_hour,
                due_minute,
            };
            let draft = validated_draft(&input, status.parse()?)?;
            let task = client.create_task(&draft)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Created task: {} ({})", task.title, task.id);
            }
        }
        Command::List { page } => {
            let tasks = client.list_tasks()?;
            let task_page = paginate(&tasks, page);
            if cli.json {
                print_page_json(&task_page);
            } else {
                print_page_table(&task_page)?;
            }
        }
        Command::Show { id } | Command::Search { id } => {
            show_task(&client, &id, cli.json)?;
        }
        Command::Edit {
            id,
            title,
            description,
            status,
            due_day,
            due_month,
            due_year,
            due_hour,
            due_minute,
        } => {
            let id = parse_task_id(&id)?;
            let current = client.get_task(id)?;
            // Pre-fill the form from the stored task, then overlay the flags.
            let (year, month, day, hour, minute) = datetime::split_due_date(&current.due_date)?;
            let input = TaskFormInput {
                title: title.unwrap_or_else(|| current.title.clone()),
                description: description
                    .unwrap_or_else(|| current.description.clone().unwrap_or_default()),
                due_day: due_day.unwrap_or(day),
                due_month: due_month.unwrap_or(month),
                due_year: due_year.unwrap_or(year),
                due_hour: due_hour.unwrap_or(hour),
                due_minute: due_minute.unwrap_or(minute),
            };
            let status = match status {
                Some(raw) => raw.parse()?,
                None => current.status,
            };
            let draft = validated_draft(&input, status)?;
            let task = client.update_task(id, &draft)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Updated task: {} ({})", task.title, task.id);
            }
        }
        Command::Done { id } => {
            let id = parse_task_id(&id)?;
            let current = client.get_task(id)?;
            let draft = TaskDraft {
                title: current.title.clone(),
                description: current.description.clone(),
                status: TaskStatus::Done,
                due_date: current.due_date.clone(),
            };
            let task = client.update_task(id, &draft)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Completed task: {} ({})", task.title, task.id);
            }
        }
        Command::Delete { id } => {
            let id = parse_task_id(&id)?;
            client.delete_task(id)?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("Deleted task {id}");
            }
        }
    }

    Ok(())
}

fn report_error(err: &AppError) {
    if let Some(fields) = err.field_errors() {
        for (field, message) in fields {
            eprintln!("ERROR: {field}: {message}");
        }
    } else {
        eprintln!("ERROR: {err}");
    }
}

fn run_interactive() -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                report_error(&err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskdesk".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                report_error(&normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli) {
            report_error(&err);
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            report_error(&err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            report_error(&normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        report_error(&err);
        std::process::exit(1);
    }
}
