use std::fs::File;
use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, terminal,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use vdom::{Backend, MemoryDom, NodeId, PatchOptions, PatchStats, Reconciler, TextUpdate, VNode};

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("counter.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut dom = MemoryDom::new();
    let host = dom.create_element("body").map_err(io::Error::other)?;

    // The count label changes on every key press; rewrite it instead of
    // replacing the text node.
    let options = PatchOptions::new().text_update(TextUpdate::InPlace);

    let mut count = 0usize;
    let mut old = ui(count);
    let mut root = vdom::mount(&mut dom, &old).map_err(io::Error::other)?;
    dom.append_child(host, root).map_err(io::Error::other)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = (|| -> io::Result<()> {
        let mut last = PatchStats::default();
        loop {
            draw(&mut stdout, &dom, host, &last)?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up | KeyCode::Char('+') => count += 1,
                KeyCode::Down | KeyCode::Char('-') => count = count.saturating_sub(1),
                _ => continue,
            }

            let new = ui(count);
            let mut reconciler = Reconciler::with_options(&mut dom, options);
            if let Some(node) = reconciler
                .patch(root, Some(&new), &old)
                .map_err(io::Error::other)?
            {
                root = node;
            }
            last = *reconciler.stats();
            old = new;
        }
    })();

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn ui(count: usize) -> VNode {
    let parity = if count % 2 == 0 { "even" } else { "odd" };

    VNode::element("main")
        .prop("class", parity)
        .child(VNode::element("h1").child(format!("Count: {count}")))
        .child(VNode::element("ul").children((0..count).map(|i| {
            VNode::element("li")
                .prop("index", i as i64)
                .child(format!("item {i}"))
        })))
        .child(VNode::element("p").child("up/+ add, down/- remove, q quit"))
}

fn draw(out: &mut impl Write, dom: &MemoryDom, host: NodeId, last: &PatchStats) -> io::Result<()> {
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    let dump = dom.dump(host).map_err(io::Error::other)?;
    for line in dump.lines() {
        write!(out, "{line}\r\n")?;
    }
    write!(out, "\r\nlast patch: {last}\r\n")?;
    out.flush()
}
