//! Terminal output for layouts and transitions.

use owo_colors::OwoColorize;
use quill_layout::{Container, Positioning, Transition};

/// The mode name, padded to `width` before coloring so escape codes do not
/// break column alignment.
fn mode_label(positioning: Positioning, width: usize) -> String {
    let label = format!("{:<width$}", format!("{positioning:?}"));
    match positioning {
        Positioning::Static => label.dimmed().to_string(),
        Positioning::Relative => label.cyan().to_string(),
        Positioning::Absolute | Positioning::Fixed => label.magenta().to_string(),
        Positioning::Overlapped => label.yellow().to_string(),
    }
}

/// Print every child's resolved rectangle as a table.
pub fn print_layout(container: &Container) {
    let snapshot = container.snapshot();
    println!(
        "{} desired {}x{}  content box ({}, {}, {}x{})",
        "container".bold(),
        snapshot.desired_size.width,
        snapshot.desired_size.height,
        snapshot.content_box.x,
        snapshot.content_box.y,
        snapshot.content_box.width,
        snapshot.content_box.height,
    );
    println!(
        "{:>5}  {:<8}  {:<20}  {:>9}  {:>9}  {:>9}  {:>9}",
        "index".bold(),
        "child".bold(),
        "mode".bold(),
        "x".bold(),
        "y".bold(),
        "width".bold(),
        "height".bold(),
    );
    for (index, (id, child)) in container.children().iter().enumerate() {
        let mode = mode_label(child.positioning, 20);
        match snapshot.rect_of(id) {
            Some(rect) => println!(
                "{index:>5}  {:<8}  {mode}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
                id.to_string(),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            ),
            None => println!("{index:>5}  {:<8}  {mode}  {}", id.to_string(), "collapsed".dimmed()),
        }
    }
}

/// Print what a positioning change did.
pub fn print_transition(transition: &Transition) {
    println!(
        "{} {} -> {} at index {}",
        transition.id.bold(),
        mode_label(transition.from, 0),
        mode_label(transition.to, 0),
        transition.index,
    );
    if !transition.fillers.is_empty() {
        println!("  {} placeholder line(s) inserted", transition.fillers.len().green());
    }
    if let Some(descriptor) = transition.descriptor {
        println!(
            "  anchored after index {} at ({}, {}), aligned {:?}",
            descriptor.preceding_index, descriptor.offset.x, descriptor.offset.y, descriptor.alignment,
        );
    }
}
