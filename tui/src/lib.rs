//! TUI rendering for Stepwise using ratatui.
//!
//! Every widget resolves the form session through its own child scope of
//! [`WizardApp::scope`], the same way a nested component would.

mod app;
mod draft;
mod editor;
mod input;
mod pages;
mod theme;

pub use app::{Status, WizardApp};
pub use draft::FieldDraft;
pub use editor::FieldEditor;
pub use input::{handle_events, handle_key};
pub use pages::{FormPage, account_steps};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use std::cmp::Ordering;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use stepwise_core::{FormSnapshot, Scope, SessionError};
use stepwise_types::{FieldName, FormFields};

/// Main draw function. Call [`WizardApp::prepare_frame`] first so the
/// editor and submit hook match the page on screen.
pub fn draw(frame: &mut Frame, app: &WizardApp) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Step indicator
            Constraint::Min(3),    // Page
            Constraint::Length(2), // Status + key hints
        ])
        .split(frame.area());

    let root = app.scope();
    draw_header(frame, &root.child(), chunks[0], &palette, &glyphs);
    draw_page(frame, &root.child(), app, chunks[1], &palette, &glyphs);
    draw_footer(frame, &root.child(), app, chunks[2], &palette);
}

fn draw_header(
    frame: &mut Frame,
    scope: &Scope<'_, FormPage>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let spans = scope.use_form().and_then(|form| {
        form.with_state(|state| {
            let current = state.position().step_index();
            let mut spans = Vec::new();
            for (index, step) in state.steps().iter().enumerate() {
                if index > 0 {
                    spans.push(Span::styled(
                        glyphs.step_separator,
                        Style::default().fg(palette.bg_border),
                    ));
                }
                let name = step.first().map_or("", |page| page.step);
                let (glyph, style) = match current.map(|current| index.cmp(&current)) {
                    Some(Ordering::Less) => (glyphs.step_done, Style::default().fg(palette.success)),
                    Some(Ordering::Equal) => (glyphs.step_current, styles::title(palette)),
                    _ => (glyphs.step_todo, Style::default().fg(palette.text_muted)),
                };
                spans.push(Span::styled(format!("{glyph} {name}"), style));
            }
            spans
        })
    });

    let line = match spans {
        Ok(spans) => Line::from(spans),
        Err(err) => error_line(&err, palette),
    };
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.bg_border)),
    );
    frame.render_widget(header, area);
}

/// What the page body needs, copied out of the session.
struct PageView {
    page: FormPage,
    sub_step: usize,
    sub_steps: usize,
    values: FormFields,
}

fn page_view(scope: &Scope<'_, FormPage>) -> Result<Option<PageView>, SessionError> {
    let form = scope.use_form()?;
    let values = form.form_data()?;
    form.with_state(|state| {
        let position = state.position();
        let page = *state.current_unit()?;
        Some(PageView {
            page,
            sub_step: position.sub_step,
            sub_steps: state.steps().sub_step_count(position.step).unwrap_or(1),
            values,
        })
    })
}

fn draw_page(
    frame: &mut Frame,
    scope: &Scope<'_, FormPage>,
    app: &WizardApp,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .padding(Padding::horizontal(1));

    let view = match page_view(scope) {
        Ok(Some(view)) => view,
        Ok(None) => {
            let message = Line::from(Span::styled(
                "No page at this position",
                Style::default().fg(palette.text_muted),
            ));
            frame.render_widget(Paragraph::new(message).block(block), area);
            return;
        }
        Err(err) => {
            frame.render_widget(Paragraph::new(error_line(&err, palette)).block(block), area);
            return;
        }
    };

    let title = if view.sub_steps > 1 {
        format!(" {} ({}/{}) ", view.page.title, view.sub_step + 1, view.sub_steps)
    } else {
        format!(" {} ", view.page.title)
    };
    let block = block.title(Span::styled(title, styles::title(palette)));
    let inner = block.inner(area);

    let label_width = view
        .page
        .fields
        .iter()
        .map(|field| field.label().width())
        .max()
        .unwrap_or(0);

    let focused = app.focused_field();
    let mut lines = Vec::with_capacity(view.page.fields.len());
    let mut cursor = None;
    for (row, field) in view.page.fields.iter().copied().enumerate() {
        let is_focused = focused == Some(field);
        let marker = if is_focused { glyphs.selected } else { " " };
        let prefix = format!("{marker} {:<label_width$}  ", field.label());
        let value = if is_focused {
            app.draft().text()
        } else {
            view.values.get(field)
        };
        let shown = display_value(field, value, glyphs);

        let (label_style, value_style) = if is_focused {
            (
                styles::key_highlight(palette),
                styles::focused_field(palette),
            )
        } else {
            (
                Style::default().fg(palette.text_secondary),
                Style::default().fg(palette.text_primary),
            )
        };
        lines.push(Line::from(vec![
            Span::styled(prefix.clone(), label_style),
            Span::styled(shown, value_style),
        ]));

        if is_focused {
            let column = if field.is_secret() {
                app.draft().cursor()
            } else {
                app.draft().cursor_column()
            };
            cursor = Some((prefix.width() + column, row));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if let Some((column, row)) = cursor
        && let (Ok(column), Ok(row)) = (u16::try_from(column), u16::try_from(row))
        && column < inner.width
        && row < inner.height
    {
        frame.set_cursor_position((inner.x + column, inner.y + row));
    }
}

fn display_value(field: FieldName, value: &str, glyphs: &Glyphs) -> String {
    if field.is_secret() {
        std::iter::repeat_n(glyphs.mask, value.graphemes(true).count()).collect()
    } else {
        value.to_owned()
    }
}

fn draw_footer(
    frame: &mut Frame,
    scope: &Scope<'_, FormPage>,
    app: &WizardApp,
    area: Rect,
    palette: &Palette,
) {
    let status = match app.status() {
        Some(Status::Error(message)) => Line::from(Span::styled(
            format!(" Error: {message}"),
            Style::default().fg(palette.error),
        )),
        Some(Status::Info(message)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(palette.accent),
        )),
        None => Line::default(),
    };

    let hints = match scope.use_form().and_then(|form| form.snapshot()) {
        Ok(snapshot) => key_hints(&snapshot, palette),
        Err(err) => error_line(&err, palette),
    };

    frame.render_widget(Paragraph::new(vec![status, hints]), area);
}

fn key_hints(snapshot: &FormSnapshot, palette: &Palette) -> Line<'static> {
    let key = styles::key_highlight(palette);
    let text = styles::key_hint(palette);
    let mut spans = vec![
        Span::raw(" "),
        Span::styled("Enter", key),
        Span::styled(
            if snapshot.is_last_step {
                " Submit  "
            } else {
                " Next  "
            },
            text,
        ),
    ];
    if !snapshot.is_first_step {
        spans.push(Span::styled("Esc", key));
        spans.push(Span::styled(" Back  ", text));
    }
    spans.extend([Span::styled("Tab", key), Span::styled(" Field  ", text)]);
    // Alt+digit reaches the first nine steps.
    let jumpable = snapshot.step_count.min(9);
    if jumpable > 1 {
        spans.push(Span::styled(format!("Alt+1-{jumpable}"), key));
        spans.push(Span::styled(" Jump  ", text));
    }
    spans.extend([Span::styled("Ctrl+C", key), Span::styled(" Quit", text)]);
    Line::from(spans)
}

fn error_line(err: &SessionError, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {err}"),
        Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD),
    ))
}
