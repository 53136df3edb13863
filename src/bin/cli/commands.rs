//! Command implementations for the CLI tool.

use leetbox::{
    Error, Problem, ProblemScaffold, Result, ReturnKind, RunTarget, Runner, Workspace,
    to_camel_case,
};

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::{ProblemRow, create_formatter};
use crate::picker::select_item;
use crate::prompt;

/// Shared state for all commands.
pub struct Context {
    pub workspace: Workspace,
    pub runner: Runner,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Prints a command result unless human output is silenced.
    fn emit(&self, text: String) {
        if !(self.quiet && self.format == OutputFormat::Human) {
            print!("{}", text);
            if self.format == OutputFormat::Json {
                println!();
            }
        }
    }

    fn note(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Clean exit after the user backed out of a picker or prompt.
    fn cancelled(&self) -> Result<ExitCode> {
        self.note("No selection made. Exiting.");
        Ok(ExitCode::Success)
    }
}

/// Prints an error and converts the outcome to an exit code.
pub fn report(result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            let code = error_to_exit_code(&e);
            if code == ExitCode::UserInterrupt {
                eprintln!("\nInterrupted");
            } else {
                eprintln!("Error: {}", e);
            }
            code
        }
    }
}

/// Uses the given problem name or lets the user pick one.
fn pick_problem(ctx: &Context, given: Option<String>, title: &str) -> Result<Option<Problem>> {
    let name = match given {
        Some(name) => name,
        None => {
            let problems = ctx.workspace.problems()?;
            if problems.is_empty() {
                return Err(Error::ProblemNotFound {
                    name: format!("(no problems in {})", ctx.workspace.problems_dir().display()),
                });
            }
            match select_item(&problems, title)? {
                Some(name) => name,
                None => return Ok(None),
            }
        }
    };
    ctx.workspace.problem(&name).map(Some)
}

/// Top-level interactive menu
pub fn menu(ctx: &Context) -> Result<ExitCode> {
    let Some(pick) = select_item(&["latest", "compare", "add", "remove"], "Select a command")?
    else {
        return ctx.cancelled();
    };
    match pick.as_str() {
        "latest" => run(ctx, RunTarget::Latest, None),
        "compare" => run(ctx, RunTarget::Compare, None),
        "add" => add_menu(ctx),
        _ => remove_menu(ctx),
    }
}

/// `add` without a target
pub fn add_menu(ctx: &Context) -> Result<ExitCode> {
    let Some(pick) = select_item(&["variant", "problem"], "Select an add command")? else {
        return ctx.cancelled();
    };
    if pick == "variant" {
        add_variant(ctx, None, None, ReturnKind::default())
    } else {
        add_problem(ctx, None, None)
    }
}

/// `remove` without a target
pub fn remove_menu(ctx: &Context) -> Result<ExitCode> {
    let Some(pick) = select_item(&["variant", "problem"], "Select a remove command")? else {
        return ctx.cancelled();
    };
    if pick == "variant" {
        remove_variant(ctx, None, None, false)
    } else {
        remove_problem(ctx, None, false)
    }
}

/// Latest and compare command implementation
pub fn run(ctx: &Context, target: RunTarget, problem: Option<String>) -> Result<ExitCode> {
    let title = format!("Select a problem to run ({})", target);
    let Some(problem) = pick_problem(ctx, problem, &title)? else {
        return ctx.cancelled();
    };

    let status = ctx.runner.run(&problem, target)?;
    if status.success() {
        Ok(ExitCode::Success)
    } else {
        ctx.note(&format!(
            "Could not run {} for problem \"{}\" ({}).",
            target,
            problem.name(),
            status
        ));
        Ok(ExitCode::Warning)
    }
}

/// Add variant command implementation
pub fn add_variant(
    ctx: &Context,
    problem: Option<String>,
    name: Option<String>,
    fallback: ReturnKind,
) -> Result<ExitCode> {
    let Some(problem) = pick_problem(ctx, problem, "Select a problem to add a variant to")? else {
        return ctx.cancelled();
    };

    let raw_name = match name {
        Some(name) => name,
        None => prompt::input_required("Variant name (e.g. \"Brute force\")")?,
    };

    let added = problem.add_variant(&raw_name, fallback)?;
    let formatter = create_formatter(ctx.format);
    ctx.emit(formatter.format_added_variant(&added, ctx.workspace.root()));
    Ok(ExitCode::Success)
}

/// Add problem command implementation
pub fn add_problem(ctx: &Context, name: Option<String>, short_name: Option<String>) -> Result<ExitCode> {
    let display_name = match name {
        Some(name) => name,
        None => prompt::input_required(
            "Problem name (e.g. \"Longest Substring Without Repeating Characters\")",
        )?,
    };

    let short_name = match short_name {
        Some(short) => short,
        None => {
            let default = to_camel_case(&display_name).unwrap_or_default();
            prompt::input_with_default("Short name (folder)", &default)?
        }
    };

    let scaffold = ProblemScaffold::new(&display_name, Some(&short_name))?;
    let problem = ctx.workspace.add_problem(&scaffold)?;
    let formatter = create_formatter(ctx.format);
    ctx.emit(formatter.format_added_problem(&problem, ctx.workspace.root()));
    Ok(ExitCode::Success)
}

/// Remove variant command implementation
pub fn remove_variant(
    ctx: &Context,
    problem: Option<String>,
    name: Option<String>,
    yes: bool,
) -> Result<ExitCode> {
    let Some(problem) = pick_problem(ctx, problem, "Select a problem to remove a variant from")?
    else {
        return ctx.cancelled();
    };

    let name = match name {
        Some(name) => name,
        None => {
            let variants = problem.variants()?;
            if variants.is_empty() {
                ctx.note("No variants found to remove.");
                return Ok(ExitCode::Success);
            }
            let labels: Vec<String> = variants.iter().map(|v| v.label()).collect();
            let title = format!("Select a variant to remove ({})", problem.name());
            let Some(picked) = select_item(&labels, &title)? else {
                return ctx.cancelled();
            };
            match labels.iter().position(|l| *l == picked) {
                Some(idx) => variants[idx].name.clone(),
                None => return ctx.cancelled(),
            }
        }
    };

    let question = format!("Remove variant \"{}\" from \"{}\"?", name, problem.name());
    if !yes && !prompt::confirm(&question)? {
        ctx.note("Aborted.");
        return Ok(ExitCode::Success);
    }

    let removed = problem.remove_variant(&name)?;
    let formatter = create_formatter(ctx.format);
    ctx.emit(formatter.format_removed_variant(&removed, ctx.workspace.root()));
    Ok(ExitCode::Success)
}

/// Remove problem command implementation
pub fn remove_problem(ctx: &Context, problem: Option<String>, yes: bool) -> Result<ExitCode> {
    let Some(problem) = pick_problem(ctx, problem, "Select a problem to remove")? else {
        return ctx.cancelled();
    };

    let question = format!(
        "Remove entire problem folder \"problems/{}\"? This cannot be undone.",
        problem.name()
    );
    if !yes && !prompt::confirm(&question)? {
        ctx.note("Aborted.");
        return Ok(ExitCode::Success);
    }

    let removed = ctx.workspace.remove_problem(problem.name())?;
    let formatter = create_formatter(ctx.format);
    ctx.emit(formatter.format_removed_problem(&removed, ctx.workspace.root()));
    Ok(ExitCode::Success)
}

/// List command implementation
pub fn list(ctx: &Context, problem: Option<String>) -> Result<ExitCode> {
    let formatter = create_formatter(ctx.format);

    if let Some(name) = problem {
        let problem = ctx.workspace.problem(&name)?;
        let variants = problem.variants()?;
        print!(
            "{}",
            formatter.format_variants(problem.name(), &variants, ctx.workspace.root())
        );
        return Ok(ExitCode::Success);
    }

    let mut rows = Vec::new();
    for name in ctx.workspace.problems()? {
        let registry = ctx.workspace.problem(&name).and_then(|p| p.load_registry());
        let row = match registry {
            Ok(model) => ProblemRow {
                name,
                variants: Some(model.len()),
                latest: model.latest().map(|e| e.name.clone()),
            },
            Err(e) => {
                log::warn!("skipping registry of {}: {}", name, e);
                ProblemRow {
                    name,
                    variants: None,
                    latest: None,
                }
            }
        };
        rows.push(row);
    }
    print!("{}", formatter.format_problems(&rows));
    if ctx.format == OutputFormat::Json {
        println!();
    }
    Ok(ExitCode::Success)
}
