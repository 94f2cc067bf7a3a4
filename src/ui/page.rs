//! The scrolling page: layout, rendering and card fade-in.
//!
//! The whole page is laid out in "page coordinates" (row 0 is the top of the
//! hero) and rendered into an off-screen buffer as tall as the page.  The
//! visible window is then copied into the frame at the current scroll
//! offset with [`blit`].

use std::collections::HashMap;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Widget},
};

use crate::core::contact::ContactDesk;
use crate::core::content::{Portfolio, ProjectEntry, SkillEntry};
use crate::core::form::{FieldError, FieldKind, FormKind};
use crate::core::nav::Section;
use crate::core::reveal::{Region, RegionKey, VisibilityTracker};

use super::spinner::spinner_frame;
use super::theme::Theme;
use super::wrap;

pub const MAX_CONTENT_WIDTH: u16 = 100;
const HERO_HEIGHT: u16 = 9;
const HERO_BUTTON: &str = "[ View Projects ]";
const SECTION_GAP: u16 = 1;
const CARD_GAP: u16 = 2;
const PAD_X: u16 = 2;
pub const MULTILINE_ROWS: usize = 4;
/// Fade-in steps from hidden (0) to fully shown.
pub const FADE_STEPS: u8 = 3;

const REQUEST_BLURB: &str = "Fill this form to hire me! I will reply within 24 hours.";
const OFFLINE_NOTICE: &str =
    "Sending is disabled: no relay access key configured (FOLIO_WEB3FORMS_KEY).";

// ───────────────────────────────────────── row model ─────────

/// One row of text content inside a block or card.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Blank,
    Heading(String),
    Text(String),
    Muted(String),
    Notice(String),
    LabeledLink(&'static str, String),
    Tags(Vec<&'static str>),
    Badges(Vec<SkillEntry>),
    Button(String),
    FieldLabel { kind: FormKind, field: usize },
    FieldInput { kind: FormKind, field: usize, line: usize },
    Submit(FormKind),
}

/// A bordered section on the page.
#[derive(Debug, Clone)]
pub struct BlockSlot {
    pub section: Section,
    pub title: &'static str,
    pub rect: Rect,
    pub rows: Vec<Row>,
}

/// A project card.
#[derive(Debug, Clone)]
pub struct CardSlot {
    pub index: usize,
    pub rect: Rect,
    pub rows: Vec<Row>,
}

/// Clickable form target.  `field == kind.fields().len()` is the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub kind: FormKind,
    pub field: usize,
    pub rect: Rect,
}

// ───────────────────────────────────────── layout ────────────

#[derive(Debug, Clone)]
pub struct PageLayout {
    pub width: u16,
    pub height: u16,
    pub sections: Vec<(Section, Rect)>,
    pub blocks: Vec<BlockSlot>,
    pub cards: Vec<CardSlot>,
    pub fields: Vec<FieldSlot>,
    pub hero_button: Rect,
    /// Left edge and width of the centred content column.
    pub content_x: u16,
    pub content_width: u16,
}

/// Number of card columns for a content column `width` wide.
pub fn card_columns(width: u16) -> u16 {
    if width >= 96 {
        3
    } else if width >= 60 {
        2
    } else {
        1
    }
}

impl PageLayout {
    pub fn compute(portfolio: &Portfolio, width: u16, relay_available: bool) -> Self {
        let cw = width.min(MAX_CONTENT_WIDTH);
        let cx = (width - cw) / 2;
        let inner_w = cw.saturating_sub(2 + 2 * PAD_X) as usize;

        let mut layout = Self {
            width,
            height: 0,
            sections: Vec::new(),
            blocks: Vec::new(),
            cards: Vec::new(),
            fields: Vec::new(),
            hero_button: Rect::default(),
            content_x: cx,
            content_width: cw,
        };

        // ── hero ──────────────────────────────────────────────────
        layout.sections.push((Section::Hero, Rect::new(0, 0, width, HERO_HEIGHT)));
        let button_w = (HERO_BUTTON.chars().count() as u16).min(width);
        layout.hero_button = Rect::new((width - button_w) / 2, 6, button_w, 1);
        let mut y = HERO_HEIGHT + SECTION_GAP;

        // ── about ─────────────────────────────────────────────────
        let about = text_rows(portfolio.profile.about, inner_w, Row::Text);
        y = layout.push_block(Section::About, "About Me", about, y);

        // ── projects grid ─────────────────────────────────────────
        y = layout.push_projects(&portfolio.projects, y);

        // ── skills ────────────────────────────────────────────────
        let skills = badge_rows(&portfolio.skills, inner_w);
        y = layout.push_block(Section::Skills, "Skills", skills, y);

        // ── resume ────────────────────────────────────────────────
        y = layout.push_block(Section::Resume, "Resume", resume_rows(portfolio, inner_w), y);

        // ── project request form ──────────────────────────────────
        let mut request = text_rows(REQUEST_BLURB, inner_w, Row::Muted);
        if !relay_available {
            request.extend(text_rows(OFFLINE_NOTICE, inner_w, Row::Notice));
        }
        request.push(Row::Blank);
        request.extend(form_rows(FormKind::ProjectRequest));
        y = layout.push_block(Section::ProjectRequest, FormKind::ProjectRequest.title(), request, y);

        // ── contact ───────────────────────────────────────────────
        let profile = &portfolio.profile;
        let mut contact = vec![
            Row::LabeledLink("Email: ", profile.email.to_string()),
            Row::LabeledLink("GitHub: ", profile.github.to_string()),
            Row::Blank,
            Row::Heading(FormKind::Contact.title().to_string()),
        ];
        if !relay_available {
            contact.extend(text_rows(OFFLINE_NOTICE, inner_w, Row::Notice));
        }
        contact.push(Row::Blank);
        contact.extend(form_rows(FormKind::Contact));
        y = layout.push_block(Section::Contact, "Contact", contact, y);

        layout.height = y;
        layout.collect_field_slots();
        layout
    }

    /// Place a bordered block at `y`; returns the next free row.
    fn push_block(&mut self, section: Section, title: &'static str, rows: Vec<Row>, y: u16) -> u16 {
        let h = rows.len() as u16 + 4;
        let rect = Rect::new(self.content_x, y, self.content_width, h);
        self.sections.push((section, rect));
        self.blocks.push(BlockSlot {
            section,
            title,
            rect,
            rows,
        });
        y + h + SECTION_GAP
    }

    fn push_projects(&mut self, projects: &[ProjectEntry], top: u16) -> u16 {
        let cols = card_columns(self.content_width);
        let card_w = self.content_width.saturating_sub(CARD_GAP * (cols - 1)) / cols;
        let card_iw = card_w.saturating_sub(2 + 2) as usize;

        // Heading row + blank.
        let mut y = top + 2;
        for (row_idx, chunk) in projects.chunks(cols as usize).enumerate() {
            let bodies: Vec<Vec<Row>> = chunk.iter().map(|p| card_rows(p, card_iw)).collect();
            let row_h = bodies.iter().map(Vec::len).max().unwrap_or(0) as u16 + 2;
            for (col, rows) in bodies.into_iter().enumerate() {
                let x = self.content_x + col as u16 * (card_w + CARD_GAP);
                self.cards.push(CardSlot {
                    index: row_idx * cols as usize + col,
                    rect: Rect::new(x, y, card_w, row_h),
                    rows,
                });
            }
            y += row_h + 1;
        }
        let bottom = if projects.is_empty() { y } else { y - 1 };
        self.sections.push((
            Section::Projects,
            Rect::new(self.content_x, top, self.content_width, bottom - top),
        ));
        bottom + SECTION_GAP
    }

    fn collect_field_slots(&mut self) {
        let mut slots = Vec::new();
        for block in &self.blocks {
            let x = block.rect.x + 1 + PAD_X;
            let w = block.rect.width.saturating_sub(2 + 2 * PAD_X);
            for (i, row) in block.rows.iter().enumerate() {
                let y = block.rect.y + 2 + i as u16;
                match *row {
                    Row::FieldInput { kind, field, line: 0 } => {
                        let h = input_rows(kind.fields()[field].kind) as u16;
                        slots.push(FieldSlot {
                            kind,
                            field,
                            rect: Rect::new(x, y, w, h),
                        });
                    }
                    Row::Submit(kind) => slots.push(FieldSlot {
                        kind,
                        field: kind.fields().len(),
                        rect: Rect::new(x, y, w, 1),
                    }),
                    _ => {}
                }
            }
        }
        self.fields = slots;
    }

    pub fn section_top(&self, section: Section) -> u16 {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map_or(0, |(_, r)| r.y)
    }

    /// The section containing page row `y` (the one above it when `y` falls
    /// in a gap).
    pub fn section_at(&self, y: u16) -> Section {
        self.sections
            .iter()
            .filter(|(_, r)| r.y <= y)
            .max_by_key(|(_, r)| r.y)
            .map_or(Section::Hero, |(s, _)| *s)
    }

    pub fn card_rect(&self, index: usize) -> Option<Rect> {
        self.cards.iter().find(|c| c.index == index).map(|c| c.rect)
    }

    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.cards
            .iter()
            .find(|c| contains(c.rect, x, y))
            .map(|c| c.index)
    }

    pub fn field_at(&self, x: u16, y: u16) -> Option<FieldSlot> {
        self.fields.iter().copied().find(|f| contains(f.rect, x, y))
    }

    pub fn field_rect(&self, kind: FormKind, field: usize) -> Option<Rect> {
        self.fields
            .iter()
            .find(|f| f.kind == kind && f.field == field)
            .map(|f| f.rect)
    }

    /// Card regions in the shape the visibility tracker expects.
    pub fn reveal_regions(&self) -> impl Iterator<Item = (RegionKey, Region)> + '_ {
        self.cards.iter().map(|c| {
            (
                RegionKey(c.index),
                Region {
                    top: c.rect.y as usize,
                    height: c.rect.height as usize,
                },
            )
        })
    }

    /// Largest valid scroll offset for a viewport `viewport_h` rows tall.
    pub fn max_scroll(&self, viewport_h: u16) -> u16 {
        self.height.saturating_sub(viewport_h)
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
}

fn input_rows(kind: FieldKind) -> usize {
    match kind {
        FieldKind::Multiline => MULTILINE_ROWS,
        _ => 1,
    }
}

fn text_rows(text: &str, width: usize, make: fn(String) -> Row) -> Vec<Row> {
    wrap::wrap(text, width).into_iter().map(make).collect()
}

fn card_rows(project: &ProjectEntry, width: usize) -> Vec<Row> {
    let mut rows = text_rows(project.title, width, Row::Heading);
    rows.extend(text_rows(project.description, width, Row::Muted));
    rows.push(Row::Blank);
    let tags = pack(project.tech.iter().copied(), width, |t| t.chars().count() + 2);
    if !tags.is_empty() {
        rows.extend(tags.into_iter().map(Row::Tags));
        rows.push(Row::Blank);
    }
    rows.push(Row::Button("View Project".into()));
    rows
}

fn badge_rows(skills: &[SkillEntry], width: usize) -> Vec<Row> {
    pack(skills.iter().cloned(), width, |s| {
        s.icon.chars().count() + s.name.chars().count() + 3
    })
    .into_iter()
    .map(Row::Badges)
    .collect()
}

fn resume_rows(portfolio: &Portfolio, width: usize) -> Vec<Row> {
    let profile = &portfolio.profile;
    let mut rows = vec![Row::Heading("Summary".into())];
    rows.extend(text_rows(profile.summary, width, Row::Text));
    rows.push(Row::Blank);
    rows.push(Row::Heading("Education".into()));
    rows.extend(text_rows(profile.education, width, Row::Text));
    rows.push(Row::Blank);
    rows.push(Row::Heading("Projects".into()));
    for p in &portfolio.projects {
        let item = format!("• {} – {} ({})", p.title, p.description, p.link);
        rows.extend(text_rows(&item, width, Row::Text));
    }
    rows
}

fn form_rows(kind: FormKind) -> Vec<Row> {
    let mut rows = Vec::new();
    for (field, spec) in kind.fields().iter().enumerate() {
        rows.push(Row::FieldLabel { kind, field });
        for line in 0..input_rows(spec.kind) {
            rows.push(Row::FieldInput { kind, field, line });
        }
        rows.push(Row::Blank);
    }
    rows.push(Row::Submit(kind));
    rows
}

/// Greedily pack items of `measure` width (plus a 1-column gap) into lines.
fn pack<T>(items: impl IntoIterator<Item = T>, width: usize, measure: impl Fn(&T) -> usize) -> Vec<Vec<T>> {
    let mut lines: Vec<Vec<T>> = Vec::new();
    let mut used = 0;
    for item in items {
        let w = measure(&item);
        match lines.last_mut() {
            Some(line) if used + 1 + w <= width => {
                used += 1 + w;
                line.push(item);
            }
            _ => {
                used = w;
                lines.push(vec![item]);
            }
        }
    }
    lines
}

// ───────────────────────────────────────── fade-in ───────────

/// Per-card fade-in progress, advanced on each tick after a card reveals.
#[derive(Debug, Default)]
pub struct FadeIn {
    steps: HashMap<usize, u8>,
}

impl FadeIn {
    pub fn start(&mut self, index: usize) {
        self.steps.entry(index).or_insert(1);
    }

    /// Advance every running fade.  Returns `true` while any is animating.
    pub fn tick(&mut self) -> bool {
        let mut animating = false;
        for step in self.steps.values_mut() {
            if *step < FADE_STEPS {
                *step += 1;
                animating = true;
            }
        }
        animating
    }

    /// Current step for a card.  Unrevealed cards are hidden; revealed cards
    /// without a running fade are fully shown.
    pub fn step(&self, index: usize, revealed: bool) -> u8 {
        if !revealed {
            return 0;
        }
        self.steps.get(&index).copied().unwrap_or(FADE_STEPS)
    }
}

// ───────────────────────────────────────── rendering ─────────

/// Everything the page renderer reads.
pub struct PageView<'a> {
    pub portfolio: &'a Portfolio,
    pub theme: &'a Theme,
    pub tracker: &'a VisibilityTracker,
    pub fade: &'a FadeIn,
    pub focused_card: Option<usize>,
    pub desk: &'a ContactDesk,
    /// Form currently receiving keystrokes.
    pub editing: Option<FormKind>,
    /// Validation problems from the last submit attempt.
    pub errors: Option<(FormKind, &'a [FieldError])>,
    pub active_section: Section,
    pub tick: u64,
}

/// Renders the full page into a buffer sized `layout.width × layout.height`.
pub struct PageCanvas<'a> {
    pub view: &'a PageView<'a>,
    pub layout: &'a PageLayout,
}

impl Widget for PageCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.view.theme;
        buf.set_style(area, theme.page_style());

        self.render_hero(buf);
        self.render_projects_heading(buf);
        for card in &self.layout.cards {
            self.render_card(card, buf);
        }
        for block in &self.layout.blocks {
            self.render_block(block, buf);
        }
    }
}

impl PageCanvas<'_> {
    fn render_hero(&self, buf: &mut Buffer) {
        let theme = self.view.theme;
        let profile = &self.view.portfolio.profile;
        let width = self.layout.width;
        buf.set_style(Rect::new(0, 0, width, HERO_HEIGHT), theme.hero_style());

        let centred = |buf: &mut Buffer, y: u16, text: &str, style: Style| {
            let w = (text.chars().count() as u16).min(width);
            buf.set_stringn((width - w) / 2, y, text, w as usize, style);
        };
        centred(buf, 2, profile.greeting, theme.hero_style().add_modifier(Modifier::BOLD));
        centred(buf, 4, profile.tagline, theme.hero_style());
        let b = self.layout.hero_button;
        buf.set_stringn(b.x, b.y, HERO_BUTTON, b.width as usize, theme.button_style());
    }

    fn render_projects_heading(&self, buf: &mut Buffer) {
        let top = self.layout.section_top(Section::Projects);
        let title = "Projects";
        let w = title.len() as u16;
        let x = self.layout.content_x + self.layout.content_width.saturating_sub(w) / 2;
        let style = self.view.theme.page_style().add_modifier(Modifier::BOLD);
        buf.set_string(x, top, title, style);
    }

    fn render_card(&self, card: &CardSlot, buf: &mut Buffer) {
        let theme = self.view.theme;
        let revealed = self.view.tracker.is_revealed(card.index);
        let step = self.view.fade.step(card.index, revealed);
        if step == 0 {
            return;
        }

        // Slide up into place while fading in.
        let shift = u16::from(FADE_STEPS - step).min(card.rect.height);
        let rect = Rect {
            y: card.rect.y + shift,
            height: card.rect.height - shift,
            ..card.rect
        };
        let body = theme.fade_style(step);
        let border = if self.view.focused_card == Some(card.index) && step == FADE_STEPS {
            theme.focus_border_style()
        } else {
            body
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(body)
            .border_style(border);
        let inner = block.inner(rect);
        block.render(rect, buf);

        let x = inner.x + 1;
        let w = inner.width.saturating_sub(2);
        for (i, row) in card.rows.iter().enumerate().take(inner.height as usize) {
            let row_style = if step < FADE_STEPS { body } else { theme.surface_style() };
            self.render_row(row, x, inner.y + i as u16, w, row_style, buf);
        }
    }

    fn render_block(&self, slot: &BlockSlot, buf: &mut Buffer) {
        let theme = self.view.theme;
        let title_style = if self.view.active_section == slot.section {
            theme.heading_style().fg(theme.focus_border_style().fg.unwrap_or_default())
        } else {
            theme.heading_style()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(Span::styled(format!(" {} ", slot.title), title_style))
            .style(theme.surface_style())
            .border_style(theme.border_style());
        let inner = block.inner(slot.rect);
        block.render(slot.rect, buf);

        let x = inner.x + PAD_X;
        let w = inner.width.saturating_sub(2 * PAD_X);
        for (i, row) in slot.rows.iter().enumerate() {
            self.render_row(row, x, inner.y + 1 + i as u16, w, theme.surface_style(), buf);
        }
    }

    fn render_row(&self, row: &Row, x: u16, y: u16, w: u16, base: Style, buf: &mut Buffer) {
        let theme = self.view.theme;
        let line = match row {
            Row::Blank => return,
            Row::Heading(s) => Line::styled(s.clone(), base.add_modifier(Modifier::BOLD)),
            Row::Text(s) => Line::styled(s.clone(), base),
            Row::Muted(s) => Line::styled(s.clone(), base.patch(theme.muted_style().bg(base.bg.unwrap_or_default()))),
            Row::Notice(s) => Line::styled(s.clone(), theme.error_style()),
            Row::LabeledLink(label, value) => Line::from(vec![
                Span::styled(*label, base),
                Span::styled(value.clone(), theme.link_style()),
            ]),
            Row::Tags(tags) => spaced(tags.iter().map(|t| Span::styled(format!(" {t} "), theme.tag_style())), base),
            Row::Badges(skills) => spaced(
                skills
                    .iter()
                    .map(|s| Span::styled(format!(" {} {} ", s.icon, s.name), theme.button_style())),
                base,
            ),
            Row::Button(label) => Line::styled(format!("[ {label} ]"), theme.button_style()),
            Row::FieldLabel { kind, field } => self.field_label(*kind, *field),
            Row::FieldInput { kind, field, line } => {
                self.render_input(*kind, *field, *line, Rect::new(x, y, w, 1), buf);
                return;
            }
            Row::Submit(kind) => {
                self.render_submit(*kind, Rect::new(x, y, w, 1), buf);
                return;
            }
        };
        buf.set_line(x, y, &line, w);
    }

    fn field_label(&self, kind: FormKind, field: usize) -> Line<'static> {
        let theme = self.view.theme;
        let spec = &kind.fields()[field];
        let mut spans = vec![Span::styled(spec.label, theme.heading_style())];
        if spec.required {
            spans.push(Span::styled(" *", theme.error_style()));
        }
        if let Some((err_kind, errors)) = self.view.errors {
            if err_kind == kind {
                if let Some(e) = errors.iter().find(|e| e.field() == spec.name) {
                    spans.push(Span::styled(format!("  ⚠ {e}"), theme.error_style()));
                }
            }
        }
        Line::from(spans)
    }

    fn render_input(&self, kind: FormKind, field: usize, line: usize, area: Rect, buf: &mut Buffer) {
        let theme = self.view.theme;
        let form = self.view.desk.form(kind);
        let spec = &kind.fields()[field];
        let focused = self.view.editing == Some(kind) && form.focus() == field;
        let value = &form.values()[field];
        let text_w = area.width.saturating_sub(3) as usize;

        let (text, is_last) = match spec.kind {
            FieldKind::Choice(_) => (if line == 0 { format!("◂ {value} ▸") } else { String::new() }, true),
            FieldKind::Multiline => {
                let lines = wrap::wrap(value, text_w);
                let start = lines.len().saturating_sub(MULTILINE_ROWS);
                let shown = lines.len() - start;
                (lines.get(start + line).cloned().unwrap_or_default(), line + 1 == shown)
            }
            _ => {
                let chars: Vec<char> = value.chars().collect();
                let skip = chars.len().saturating_sub(text_w.saturating_sub(1));
                (chars[skip..].iter().collect(), true)
            }
        };

        let style = theme.input_style(focused);
        let field_style = theme.surface_style().add_modifier(Modifier::UNDERLINED);
        buf.set_style(area, field_style);
        buf.set_string(area.x, area.y, "│", style);

        let mut spans = Vec::new();
        if value.is_empty() && line == 0 && !spec.placeholder.is_empty() {
            spans.push(Span::styled(spec.placeholder, theme.muted_style()));
        } else {
            spans.push(Span::styled(text, field_style));
        }
        if focused && is_last && !matches!(spec.kind, FieldKind::Choice(_)) {
            spans.push(Span::styled("▏", style.add_modifier(Modifier::SLOW_BLINK)));
        }
        buf.set_line(area.x + 2, area.y, &Line::from(spans), area.width.saturating_sub(2));
    }

    fn render_submit(&self, kind: FormKind, area: Rect, buf: &mut Buffer) {
        let theme = self.view.theme;
        let desk = self.view.desk;
        let label = if desk.pending_kind() == Some(kind) {
            format!("{} Sending...", spinner_frame(self.view.tick))
        } else {
            kind.submit_label().to_string()
        };
        let mut style = if desk.is_pending() || !desk.relay_available() {
            theme.muted_style().add_modifier(Modifier::REVERSED)
        } else {
            theme.button_style()
        };
        if self.view.editing == Some(kind) && desk.form(kind).is_submit_focused() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        buf.set_style(area, style);
        let text = format!("[ {label} ]");
        let w = (text.chars().count() as u16).min(area.width);
        buf.set_stringn(area.x + (area.width - w) / 2, area.y, &text, w as usize, style);
    }
}

/// Join spans with single spaces in `gap` style.
fn spaced<'a>(spans: impl Iterator<Item = Span<'a>>, gap: Style) -> Line<'a> {
    let mut out = Vec::new();
    for (i, span) in spans.enumerate() {
        if i > 0 {
            out.push(Span::styled(" ", gap));
        }
        out.push(span);
    }
    Line::from(out)
}

/// Copy rows `offset..offset + area.height` of `page` into `area` of `buf`.
pub fn blit(page: &Buffer, offset: u16, area: Rect, buf: &mut Buffer) {
    let page_h = page.area.height;
    let cols = area.width.min(page.area.width);
    for row in 0..area.height {
        let src_y = offset.saturating_add(row);
        if src_y >= page_h {
            break;
        }
        for col in 0..cols {
            if let (Some(src), Some(dst)) = (page.cell((col, src_y)), buf.cell_mut((area.x + col, area.y + row))) {
                *dst = src.clone();
            }
        }
    }
}
