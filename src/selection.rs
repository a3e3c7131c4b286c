//! Selection grid
//!
//! Every registered interface as a card, in registry order. Cards for
//! interfaces the visitor has already entered get a check mark and an
//! accent border.

use macroquad::prelude::*;

use crate::interfaces::{InterfaceDescriptor, InterfaceId, InterfaceRegistry};
use crate::navigation::NavigationStore;
use crate::ui::{
    draw_rounded_rect, draw_text_centered, draw_wrapped, Rect, UiContext, ACCENT_COLOR, BG_COLOR, FONT_SIZE_CONTENT,
    FONT_SIZE_HEADER, FONT_SIZE_SMALL, PANEL_BG, PANEL_BORDER, PANEL_HOVER, TEXT_COLOR, TEXT_DIM,
};

const CARD_W: f32 = 260.0;
const CARD_H: f32 = 150.0;
const CARD_GAP: f32 = 18.0;

/// One grid card's content
#[derive(Debug, Clone, PartialEq)]
pub struct GridCard<'a> {
    /// 1-based position, also the digit shortcut when <= 9
    pub number: usize,
    pub descriptor: &'a InterfaceDescriptor,
    pub visited: bool,
}

/// Cards in registry order with visited markers
pub fn grid_cards<'a>(registry: &'a InterfaceRegistry, store: &NavigationStore) -> Vec<GridCard<'a>> {
    registry
        .list()
        .iter()
        .enumerate()
        .map(|(i, descriptor)| GridCard {
            number: i + 1,
            descriptor,
            visited: store.has_visited(descriptor.id),
        })
        .collect()
}

/// Draw the grid; returns the interface the visitor picked this frame
pub fn draw_selection_grid(
    rect: Rect,
    ui: &mut UiContext,
    registry: &InterfaceRegistry,
    store: &NavigationStore,
) -> Option<InterfaceId> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, BG_COLOR);

    let content = rect.pad(32.0);
    draw_text("Choose Your Interface", content.x.round(), (content.y + 24.0).round(), FONT_SIZE_HEADER, TEXT_COLOR);

    let cards = grid_cards(registry, store);
    let seen = cards.iter().filter(|c| c.visited).count();
    let progress = format!("{} of {} explored", seen, cards.len());
    draw_text(&progress, content.x.round(), (content.y + 48.0).round(), FONT_SIZE_SMALL, TEXT_DIM);

    if cards.is_empty() {
        draw_text_centered("No interfaces registered", &content, FONT_SIZE_CONTENT, TEXT_DIM);
        return None;
    }

    let body = content.remaining_after_top(72.0);
    let cells = body.grid(cards.len(), CARD_W, CARD_H, CARD_GAP);
    let mut picked = None;
    for (card, cell) in cards.iter().zip(cells) {
        if draw_card(ui, cell, card) {
            picked = Some(card.descriptor.id);
        }
    }
    picked
}

fn draw_card(ui: &mut UiContext, rect: Rect, card: &GridCard) -> bool {
    let rect = rect.snapped();
    let hovered = ui.mouse.inside(&rect);
    let clicked = ui.take_click(&rect);
    let d = card.descriptor;

    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 8.0, if hovered { PANEL_HOVER } else { PANEL_BG });
    let border = if card.visited || hovered { ACCENT_COLOR } else { PANEL_BORDER };
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, if card.visited { 2.0 } else { 1.0 }, border);

    let x = rect.x + 14.0;
    let number = if card.number <= 9 { format!("{}", card.number) } else { String::new() };
    draw_text(&number, x, rect.y + 22.0, FONT_SIZE_SMALL, TEXT_DIM);
    draw_text(&d.name, x + 18.0, rect.y + 22.0, FONT_SIZE_CONTENT, TEXT_COLOR);
    if card.visited {
        draw_text("[seen]", rect.right() - 54.0, rect.y + 22.0, FONT_SIZE_SMALL, ACCENT_COLOR);
    }

    draw_wrapped(&d.description, x, rect.y + 34.0, rect.w - 28.0, FONT_SIZE_SMALL, TEXT_DIM);

    let badges = format!("{} complexity  |  {}", d.complexity.label(), d.mobile_support.label());
    draw_text(&badges, x, rect.bottom() - 12.0, FONT_SIZE_SMALL, TEXT_DIM);

    clicked
}
