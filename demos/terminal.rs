//! Terminal Demo - the widget tree driven by crossterm
//!
//! Paints the tree with the software backend and shows one block per
//! terminal cell, sampled at the cell center. Text is not rasterized.
//!
//! - Click the button to grow the list
//! - Drag the slider or scroll it while focused
//! - Scroll the list with the wheel or its scroll bar
//!
//! Run with: cargo run --example terminal
//! Logs: RUST_LOG=nodal_ui=debug cargo run --example terminal 2> demo.log

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use tracing_subscriber::EnvFilter;

use nodal_ui::{
    Button, Dimension, FlexDirection, Label, NodeId, Panel, Rgba, ScrollArea, Slider,
    SoftwareBackend, TerminalInput, Ui, UiConfig, Vec2,
};

const CELL: Vec2 = Vec2::new(8.0, 16.0);

fn main() -> nodal_ui::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let (columns, rows) = terminal::size()?;
    let mut input = TerminalInput::new();
    input.cell_size = CELL;

    let size = Vec2::new(columns as f32 * CELL.x, rows as f32 * CELL.y);
    let mut ui = Ui::new(size, UiConfig::default(), Box::new(input.platform()))?;
    let clicks = Rc::new(Cell::new(0u32));
    let list = build(&mut ui, clicks.clone())?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = run(&mut ui, &input, &clicks, list);

    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

/// Column with a toolbar (button + slider) above a scrolling list.
fn build(ui: &mut Ui, clicks: Rc<Cell<u32>>) -> nodal_ui::Result<NodeId> {
    let root = ui.root();
    let tree = ui.tree_mut();

    let toolbar = tree.create_named("toolbar", Panel)?;
    {
        let flex = tree.flex_mut(toolbar);
        flex.flex_direction = FlexDirection::Row;
        flex.set_padding(8.0);
        flex.gap = 16.0;
    }
    if let Some(node) = tree.node_mut(toolbar) {
        node.fill_color = Rgba::rgb(60, 60, 70);
    }
    tree.add_child(root, toolbar)?;

    let button = tree.create_named(
        "add",
        Button::new("Add row").with_on_click(move || clicks.set(clicks.get() + 1)),
    )?;
    tree.add_child(toolbar, button)?;

    let slider = tree.create_named(
        "slider",
        Slider::new(0.0, 100.0).with_on_change(|value| tracing::info!(value, "slider moved")),
    )?;
    tree.flex_mut(slider).width = Dimension::Points(160.0);
    tree.add_child(toolbar, slider)?;

    let area = tree.create_named("area", ScrollArea::new())?;
    {
        let flex = tree.flex_mut(area);
        flex.flex_grow = 1.0;
        flex.flex_shrink = 1.0;
        flex.min_height = Dimension::Points(0.0);
    }
    tree.add_child(root, area)?;

    let list = tree.create_named("list", Panel)?;
    {
        let flex = tree.flex_mut(list);
        flex.flex_shrink = 0.0;
        flex.gap = 4.0;
        flex.set_padding(4.0);
    }
    tree.add_child(area, list)?;
    for index in 0..12 {
        add_row(ui, list, index)?;
    }
    Ok(list)
}

fn add_row(ui: &mut Ui, list: NodeId, index: u32) -> nodal_ui::Result<()> {
    let tree = ui.tree_mut();
    let row = tree.create_node(Label::new(format!("Row {index}")))?;
    tree.flex_mut(row).height = Dimension::Points(CELL.y * 2.0);
    if let Some(node) = tree.node_mut(row) {
        let shade = if index % 2 == 0 { 210 } else { 170 };
        node.fill_color = Rgba::rgb(shade, shade, 240);
    }
    tree.add_child(list, row)
}

fn run(
    ui: &mut Ui,
    input: &TerminalInput,
    clicks: &Cell<u32>,
    list: NodeId,
) -> nodal_ui::Result<()> {
    let mut backend = SoftwareBackend::new(0, 0);
    let mut rows = 12;
    let mut last_frame = Instant::now();

    loop {
        while rows < 12 + clicks.get() {
            add_row(ui, list, rows)?;
            rows += 1;
        }

        let now = Instant::now();
        ui.advance_timers(now - last_frame);
        last_frame = now;

        let size = ui.size();
        let (width, height) = (size.x as usize, size.y as usize);
        if backend.width() != width || backend.height() != height {
            backend.resize(width, height);
        }
        backend.clear(Rgba::rgb(30, 30, 36));
        let stats = ui.draw(&mut backend)?;
        tracing::trace!(nodes = stats.nodes_drawn, "frame");
        present(&backend)?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = event::read()?;
        if let CrosstermEvent::Key(key) = &event {
            let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
            if quit && key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
        input.dispatch(ui, &event);
    }
}

/// One background-colored cell per terminal cell.
fn present(backend: &SoftwareBackend) -> io::Result<()> {
    let mut stdout = io::stdout();
    let columns = backend.width() / CELL.x as usize;
    let rows = backend.height() / CELL.y as usize;
    for row in 0..rows {
        queue!(stdout, MoveTo(0, row as u16))?;
        for column in 0..columns {
            let x = column * CELL.x as usize + CELL.x as usize / 2;
            let y = row * CELL.y as usize + CELL.y as usize / 2;
            let pixel = backend.pixel(x, y);
            queue!(
                stdout,
                SetBackgroundColor(Color::Rgb {
                    r: pixel.r,
                    g: pixel.g,
                    b: pixel.b,
                }),
                Print(' ')
            )?;
        }
    }
    queue!(stdout, ResetColor)?;
    stdout.flush()
}
