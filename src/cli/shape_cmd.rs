//! Shape CLI commands

use anyhow::{Context, Result};

use super::output::{shape_json, Output};
use crate::domain::{Shape, ShapeId, ShapeKind, Unit};
use crate::storage::ShapeRepository;

pub fn add(
    repo: &mut ShapeRepository,
    output: &Output,
    kind: ShapeKind,
    dimension: f64,
    unit: Unit,
) -> Result<()> {
    let meters = unit.convert(dimension, Unit::Meters);
    let id = repo
        .create(kind, meters)
        .with_context(|| format!("Cannot create {}", kind.key()))?;

    let shape = repo
        .get(id)
        .with_context(|| format!("Shape {} vanished after being stored", id))?;

    if output.is_json() {
        output.data(&shape_json(shape, unit));
    } else {
        output.success(&format!(
            "Created {} #{} ({} {}; {})",
            shape.name(),
            id,
            kind.dimension_name(),
            output.length(shape.dimension(), unit),
            output.metrics(shape, unit)
        ));
    }

    Ok(())
}

pub fn list(repo: &ShapeRepository, output: &Output, kind: Option<&str>, unit: Unit) -> Result<()> {
    let shapes = match kind {
        Some(kind) => repo.find_by_type(kind),
        None => repo.list(),
    };

    if output.is_json() {
        let items: Vec<_> = shapes.iter().map(|s| shape_json(s, unit)).collect();
        output.data(&items);
        return Ok(());
    }

    if shapes.is_empty() {
        match kind {
            Some(kind) => println!("No shapes of type '{}'", kind),
            None => println!("No shapes stored"),
        }
        return Ok(());
    }

    println!("{:<6} {:<8} {:<4} {:<20} METRICS", "ID", "TYPE", "KIND", "SIZE");
    println!("{}", "-".repeat(80));

    for shape in &shapes {
        print_row(output, shape, unit);
    }

    println!();
    println!("{} shape(s)", shapes.len());

    Ok(())
}

fn print_row(output: &Output, shape: &Shape, unit: Unit) {
    let size = format!(
        "{} {}",
        shape.kind().dimension_name(),
        output.length(shape.dimension(), unit)
    );
    println!(
        "{:<6} {:<8} {:<4} {:<20} {}",
        shape.id(),
        shape.name(),
        shape.dimensionality(),
        size,
        output.metrics(shape, unit)
    );
}

pub fn show(repo: &ShapeRepository, output: &Output, id: ShapeId, unit: Unit) -> Result<()> {
    let shape = repo
        .get(id)
        .with_context(|| format!("Shape not found: {}", id))?;

    if output.is_json() {
        output.data(&shape_json(shape, unit));
        return Ok(());
    }

    let m = shape.measurements().convert(Unit::Meters, unit);

    println!("ID:        {}", shape.id());
    println!("Type:      {} ({})", shape.name(), shape.dimensionality());
    println!(
        "{:<10} {}",
        format!("{}:", capitalize(shape.kind().dimension_name())),
        output.length(shape.dimension(), unit)
    );
    if let Some(area) = m.area {
        println!("Area:      {}", output.quantity(area, unit, 2));
    }
    if let Some(perimeter) = m.perimeter {
        println!("Perimeter: {}", output.quantity(perimeter, unit, 1));
    }
    if let Some(volume) = m.volume {
        println!("Volume:    {}", output.quantity(volume, unit, 3));
    }
    if let Some(surface) = m.surface_area {
        println!("Surface:   {}", output.quantity(surface, unit, 2));
    }

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn delete(repo: &mut ShapeRepository, output: &Output, id: ShapeId) -> Result<()> {
    if !repo.delete(id) {
        anyhow::bail!("Shape not found: {}", id);
    }

    if output.is_json() {
        output.data(&serde_json::json!({ "deleted": id }));
    } else {
        output.success(&format!("Deleted shape #{}", id));
    }

    Ok(())
}

pub fn clear(repo: &mut ShapeRepository, output: &Output) -> Result<()> {
    let removed = repo.count();
    repo.clear();

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else {
        output.success(&format!("Removed {} shape(s)", removed));
    }

    Ok(())
}

pub fn count(repo: &ShapeRepository, output: &Output) -> Result<()> {
    if output.is_json() {
        output.data(&serde_json::json!({ "count": repo.count() }));
    } else {
        println!("{}", repo.count());
    }

    Ok(())
}

pub fn stats(repo: &ShapeRepository, output: &Output, unit: Unit) -> Result<()> {
    let stats = repo.stats();
    let summary = repo.summary();

    if output.is_json() {
        output.data(&serde_json::json!({
            "stats": stats,
            "summary": summary,
        }));
        return Ok(());
    }

    println!("Total shapes: {}", stats.get("total").copied().unwrap_or(0));
    for kind in ShapeKind::ALL {
        println!(
            "  {:<8} {}",
            kind.key(),
            stats.get(kind.key()).copied().unwrap_or(0)
        );
    }

    if summary.flat > 0 {
        println!();
        println!("2D shapes: {}", summary.flat);
        println!(
            "  area       total {}, average {}",
            output.quantity(Unit::Meters.convert_area(summary.total_area, unit), unit, 2),
            output.quantity(Unit::Meters.convert_area(summary.average_area, unit), unit, 2)
        );
        println!(
            "  perimeter  total {}, average {}",
            output.quantity(Unit::Meters.convert(summary.total_perimeter, unit), unit, 1),
            output.quantity(Unit::Meters.convert(summary.average_perimeter, unit), unit, 1)
        );
    }

    if summary.solid > 0 {
        println!();
        println!("3D shapes: {}", summary.solid);
        println!(
            "  volume     total {}, average {}",
            output.quantity(Unit::Meters.convert_volume(summary.total_volume, unit), unit, 3),
            output.quantity(Unit::Meters.convert_volume(summary.average_volume, unit), unit, 3)
        );
    }

    Ok(())
}
