use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::model::template::{Template, TemplateStatus, find_template};
use crate::store::board_io;

/// Infer a board name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Load a template from a JSON file: either a full Template object or a bare
/// status list (the export format of older boards, category optional).
fn load_template_file(path: &Path) -> Result<Template, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
    if let Ok(template) = serde_json::from_str::<Template>(&text) {
        return Ok(template);
    }
    let statuses: Vec<TemplateStatus> = serde_json::from_str(&text)
        .map_err(|e| format!("could not parse {}: {}", path.display(), e))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "custom".to_string());
    Ok(Template {
        id: stem.clone(),
        name: stem,
        statuses,
    })
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    if cwd.join("slate").join("board.toml").exists() {
        return Err("already a slate board".into());
    }

    let name = match args.name {
        Some(name) => name,
        None => {
            let dir_name = cwd
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "board".to_string());
            infer_name(&dir_name)
        }
    };

    let template = match &args.from {
        Some(path) => load_template_file(Path::new(path))?,
        None => find_template(&args.template).ok_or_else(|| {
            format!(
                "unknown template: {} (try `slate templates`)",
                args.template
            )
        })?,
    };

    let board = board_io::init_board(&cwd, &name, &template)?;
    println!(
        "initialized board \"{}\" with {} statuses",
        board.config.board.name,
        template.statuses.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_inference_title_cases_hyphens() {
        assert_eq!(infer_name("my-cool-project"), "My Cool Project");
        assert_eq!(infer_name("slate"), "Slate");
    }
}
