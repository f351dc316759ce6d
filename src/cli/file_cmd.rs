//! Data file and unit commands

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::Unit;
use crate::storage::ShapeRepository;

pub fn export(repo: &ShapeRepository, output: &Output, path: &Path) -> Result<()> {
    repo.export_to(path)
        .with_context(|| format!("Failed to export shapes to {}", path.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "exported": repo.count(),
            "path": path.display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Exported {} shape(s) to {}",
            repo.count(),
            path.display()
        ));
    }

    Ok(())
}

pub fn import(repo: &mut ShapeRepository, output: &Output, path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let imported = repo.import_from(path);

    if output.is_json() {
        output.data(&serde_json::json!({
            "imported": imported,
            "total": repo.count(),
        }));
    } else {
        output.success(&format!(
            "Imported {} shape(s) from {} ({} stored)",
            imported,
            path.display(),
            repo.count()
        ));
    }

    Ok(())
}

pub fn info(repo: &ShapeRepository, output: &Output) -> Result<()> {
    let file = repo.file_info();
    let next_id = repo.ids().current().checked_add(1);

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": file,
            "shapes": repo.count(),
            "next_id": next_id,
            "auto_save": repo.auto_save(),
        }));
        return Ok(());
    }

    println!("Data file:  {}", file.path.display());
    println!("Exists:     {}", if file.exists { "yes" } else { "no" });
    println!("Size:       {} bytes", file.size);
    if let Some(modified) = file.modified {
        println!("Modified:   {}", modified.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("Shapes:     {}", repo.count());
    match next_id {
        Some(next_id) => println!("Next ID:    {}", next_id),
        None => println!("Next ID:    none (IDs exhausted)"),
    }
    println!("Auto-save:  {}", if repo.auto_save() { "on" } else { "off" });

    Ok(())
}

pub fn convert(output: &Output, value: f64, from: Unit, to: Unit) -> Result<()> {
    let result = from.convert(value, to);

    if output.is_json() {
        output.data(&serde_json::json!({
            "value": value,
            "from": from.symbol(),
            "to": to.symbol(),
            "result": result,
        }));
    } else {
        println!(
            "{} = {}",
            output.quantity(value, from, 1),
            output.quantity(result, to, 1)
        );
    }

    Ok(())
}
