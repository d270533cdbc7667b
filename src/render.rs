//! Day-cell renderer seam.
//!
//! The engine never draws. A host supplies a [`DayRenderer`] turning each
//! populated cell into its own node type; any `Fn(&CalendarCell<T>) -> N`
//! qualifies. [`DefaultDayRenderer`] is the fallback.

use crate::matrix::{CalendarCell, MonthlyMatrix};
use crate::prelude::*;

/// Turns a populated cell into a host visual node.
pub trait DayRenderer<T> {
    type Node;

    fn render(&self, cell: &CalendarCell<T>) -> Self::Node;
}

impl<T, N, F> DayRenderer<T> for F
where
    F: Fn(&CalendarCell<T>) -> N,
{
    type Node = N;

    fn render(&self, cell: &CalendarCell<T>) -> N {
        self(cell)
    }
}

/// Text colour role of the fallback day label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DayTone {
    Selected,
    Adjacent,
    Sunday,
    Today,
    Normal,
}

/// Output of [`DefaultDayRenderer`]: the day number and its tone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{text}")]
pub struct DayLabel {
    pub text: String,
    pub tone: DayTone,
}

/// Renders the day number, toned Selected > Adjacent > Sunday > Today.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDayRenderer;

impl<T> DayRenderer<T> for DefaultDayRenderer {
    type Node = DayLabel;

    fn render(&self, cell: &CalendarCell<T>) -> DayLabel {
        let meta = &cell.metadata;
        let tone = if meta.is_selected_day {
            DayTone::Selected
        } else if meta.is_adjacent_month {
            DayTone::Adjacent
        } else if meta.is_sunday {
            DayTone::Sunday
        } else if meta.is_today {
            DayTone::Today
        } else {
            DayTone::Normal
        };
        DayLabel {
            text: cell.date.day().to_string(),
            tone,
        }
    }
}

/// Maps every populated cell through `renderer`, keeping empty slots empty.
pub fn render_matrix<T, R>(matrix: &MonthlyMatrix<T>, renderer: &R) -> Vec<Vec<Option<R::Node>>>
where
    R: DayRenderer<T> + ?Sized,
{
    matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|slot| slot.as_ref().map(|cell| renderer.render(cell)))
                .collect()
        })
        .collect()
}
