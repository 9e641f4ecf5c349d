//! Pile layouts.
//!
//! A layout maps a rectangle, the card size, and a pile's cards to one
//! position per card. Layouts are pure: the same inputs always produce the
//! same positions. Games pick a layout per pile kind; nothing about a layout
//! is persisted.

use crate::core::card::Card;

/// Screen rectangle allotted to a pile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Top-left corner of a laid-out card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Built-in layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Every card on the same spot.
    Squared,
    /// Cascading downwards; face-down cards get less room.
    Fanned,
    /// Cascading to the right.
    FannedRight,
    /// Binary-tree rows, one more card per row.
    Pyramid,
    /// Squared, except the top three cards fan to the right.
    TripleDraw,
}

impl Layout {
    /// One position per card, in pile order.
    #[must_use]
    pub fn positions(self, rect: Rect, width: f32, height: f32, cards: &[Card]) -> Vec<Point> {
        match self {
            Layout::Squared => squared(rect, cards.len()),
            Layout::Fanned => fanned(rect, height, cards),
            Layout::FannedRight => fanned_right(rect, width, cards.len()),
            Layout::Pyramid => pyramid(rect, width, height, cards.len()),
            Layout::TripleDraw => triple_draw(rect, width, cards.len()),
        }
    }
}

fn squared(rect: Rect, count: usize) -> Vec<Point> {
    vec![
        Point {
            x: rect.left,
            y: rect.top,
        };
        count
    ]
}

/// Visible slice per card, clamped between 1/8 and 1/3 of the card.
fn fan_delta(span: f32, card: f32, count: usize) -> f32 {
    let max_delta = card / 3.0;
    let min_delta = card / 8.0;
    let per_card = (span - card) / count as f32;
    per_card.min(max_delta).max(min_delta)
}

fn fanned(rect: Rect, height: f32, cards: &[Card]) -> Vec<Point> {
    if cards.is_empty() {
        return Vec::new();
    }
    let delta = fan_delta(rect.bottom - rect.top, height, cards.len());
    let min_delta = height / 8.0;

    let mut dy = 0.0;
    cards
        .iter()
        .map(|card| {
            let point = Point {
                x: rect.left,
                y: rect.top + dy,
            };
            dy += if card.visible { delta } else { min_delta };
            point
        })
        .collect()
}

fn fanned_right(rect: Rect, width: f32, count: usize) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let delta = fan_delta(rect.right - rect.left, width, count);
    (0..count)
        .map(|i| Point {
            x: rect.left + i as f32 * delta,
            y: rect.top,
        })
        .collect()
}

/// Row of the `index`-th card in a pyramid (row `r` holds `r + 1` cards).
#[must_use]
pub fn pyramid_row(index: usize) -> usize {
    let mut row = 0;
    let mut first_of_next = 1;
    while index >= first_of_next {
        row += 1;
        first_of_next += row + 1;
    }
    row
}

fn pyramid(rect: Rect, width: f32, height: f32, count: usize) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let rows = pyramid_row(count - 1) + 1;
    let span = rows as f32 * width;

    let mut x_start = rect.left + span / 2.0 - width / 2.0;
    let mut y = rect.top;
    let mut current_row = 0;
    let mut column = 0;
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        out.push(Point {
            x: x_start + column as f32 * width,
            y,
        });
        column += 1;
        if column > current_row {
            current_row += 1;
            column = 0;
            x_start -= width / 2.0;
            y += height / 2.0;
        }
    }
    out
}

fn triple_draw(rect: Rect, width: f32, count: usize) -> Vec<Point> {
    let fanned = count.min(3);
    let delta = width / 2.0;

    let mut out = squared(rect, count - fanned);
    out.extend((0..fanned).map(|i| Point {
        x: rect.left + i as f32 * delta,
        y: rect.top,
    }));
    out
}
