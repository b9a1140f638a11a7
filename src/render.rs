use std::io::{self, Write};

use crate::screen::{MenuView, ViewMode};

const NO_IMAGE: &str = "no image";


// Render the menu into any writer
pub fn draw(out: &mut impl Write, view: &MenuView) -> io::Result<()> {
    match view.mode {
        ViewMode::Categories => draw_menu(out, view)?,
        ViewMode::Search => draw_search(out, view)?,
    }
    draw_footer(out, view)
}

// Redraw the whole terminal screen
pub fn redraw_screen(view: &MenuView) {
    let mut stdout = io::stdout().lock();
    // Move cursor to top-left and clear screen
    let _ = write!(stdout, "\x1B[H\x1B[0J");
    let _ = draw(&mut stdout, view);
    let _ = stdout.flush();
}

fn draw_menu(out: &mut impl Write, view: &MenuView) -> io::Result<()> {
    if view.submitting {
        writeln!(out, "[ sending order... ]")?;
    }
    writeln!(out, "Menu                                   (search)\n")?;

    let chips: Vec<String> = view
        .categories
        .iter()
        .map(|c| if c.active { format!("[{}]", c.name) } else { c.name.clone() })
        .collect();
    writeln!(out, "{}\n", chips.join("  "))?;

    draw_dishes(out, view)
}

fn draw_search(out: &mut impl Write, view: &MenuView) -> io::Result<()> {
    writeln!(out, "< back")?;
    writeln!(out, "Search: {}\n", view.query)?;
    if view.dishes.is_empty() {
        writeln!(out, "Type a dish name")?;
        return Ok(());
    }
    draw_dishes(out, view)
}

fn draw_dishes(out: &mut impl Write, view: &MenuView) -> io::Result<()> {
    writeln!(out, "{:>5} | {:<28} | {:>7} | {:>3} | image", "id", "dish", "price", "qty")?;
    writeln!(out, "----- | ---------------------------- | ------- | --- | -----")?;
    for dish in &view.dishes {
        writeln!(
            out,
            "{:>5} | {:<28} | {:>7} | {:>3} | {}",
            dish.id,
            dish.name,
            dish.price,
            dish.quantity,
            dish.image_url.as_deref().unwrap_or(NO_IMAGE),
        )?;
    }
    Ok(())
}

fn draw_footer(out: &mut impl Write, view: &MenuView) -> io::Result<()> {
    if view.total == 0 {
        return Ok(());
    }
    let label = match view.mode {
        ViewMode::Categories => "Order",
        ViewMode::Search => "Cart",
    };
    writeln!(out, "\n{label}: {} rub.", view.total)
}
