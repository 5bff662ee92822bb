//! Scrollable table demo. Arrow keys scroll, `q` quits.

use std::io;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, terminal,
};
use serde_json::{Map, Value, json};

use rowgrid::{GridConfig, RowCollection, Viewport};
use rowgrid_term::{Column, TermRenderer};

fn main() -> io::Result<()> {
    let columns = vec![
        Column::new("id", "ID", 6),
        Column::new("name", "Name", 24),
        Column::new("score", "Score", 8),
    ];

    let records: Vec<Value> = (0..200)
        .map(|i| {
            let mut map = Map::new();
            map.insert("id".into(), json!(i));
            map.insert("name".into(), json!(format!("item {i}")));
            map.insert("score".into(), json!(i * 7 % 100));
            Value::Object(map)
        })
        .collect();

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

    let (width, height) = terminal::size()?;
    let viewport = Viewport::new(width, height.saturating_sub(1));

    let renderer = TermRenderer::new(io::stdout(), columns);
    let mut collection = RowCollection::with_renderer(GridConfig::new(), renderer);
    collection.resize(viewport);
    collection
        .load(Value::Array(records))
        .map_err(|err| io::Error::other(err.to_string()))?;

    loop {
        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down => collection.scroll_vertical(collection.scroll_offset() + 1),
                KeyCode::Up => {
                    collection.scroll_vertical(collection.scroll_offset().saturating_sub(1));
                }
                _ => {}
            }
        }
    }

    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
