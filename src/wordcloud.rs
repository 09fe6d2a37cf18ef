//! Word cloud rendering to SVG.
//!
//! Words are laid out greedily in rows, largest first. Font size grows linearly with
//! the word's weight; a word that no longer fits anywhere is dropped.

use plotters::prelude::*;

use crate::AnalysisError;
use crate::aggregate::WordFrequency;

pub const CLOUD_WIDTH: u32 = 800;
pub const CLOUD_HEIGHT: u32 = 300;

const MIN_FONT: f64 = 10.0;
const MAX_FONT: f64 = 56.0;
const MARGIN: f64 = 6.0;
// average glyph advance relative to font size
const CHAR_WIDTH: f64 = 0.6;

const PALETTE: &[RGBColor] = &[
    RGBColor(0x44, 0x01, 0x54),
    RGBColor(0x3b, 0x52, 0x8b),
    RGBColor(0x21, 0x91, 0x8c),
    RGBColor(0x5e, 0xc9, 0x62),
    RGBColor(0x2c, 0x72, 0x8e),
    RGBColor(0x47, 0x2d, 0x7b),
    RGBColor(0x28, 0xae, 0x80),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub x: f64,
    /// top edge of the text
    pub y: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl WordCloud {
    /// Lays out `frequencies` (sorted, most frequent first) on a `width` x `height` canvas.
    pub fn layout(frequencies: &[WordFrequency], width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let mut words = Vec::new();
        let mut cursor_x = MARGIN;
        let mut row_top = MARGIN;
        let mut row_height = 0.0_f64;

        for f in frequencies {
            let font_size = MIN_FONT + (MAX_FONT - MIN_FONT) * f.weight;
            let word_width = text_width(&f.word, font_size);
            if word_width > w - 2.0 * MARGIN {
                continue;
            }
            let (mut x, mut top) = (cursor_x, row_top);
            let wraps = x + word_width > w - MARGIN;
            if wraps {
                x = MARGIN;
                top = row_top + row_height + MARGIN;
            }
            if top + font_size > h - MARGIN {
                // a shorter word later on may still fit the current row
                continue;
            }
            if wraps {
                row_top = top;
                row_height = 0.0;
            }
            row_height = row_height.max(font_size);
            words.push(PlacedWord {
                word: f.word.clone(),
                x,
                y: top,
                font_size,
            });
            cursor_x = x + word_width + MARGIN;
        }

        WordCloud {
            width,
            height,
            words,
        }
    }

    /// Draws the cloud on a white canvas and returns the SVG document.
    pub fn to_svg(&self) -> Result<String, AnalysisError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(chart_err)?;
            for (i, p) in self.words.iter().enumerate() {
                let style = ("sans-serif", p.font_size)
                    .into_font()
                    .color(&PALETTE[i % PALETTE.len()]);
                root.draw(&Text::new(
                    p.word.as_str(),
                    (p.x.round() as i32, p.y.round() as i32),
                    style,
                ))
                .map_err(chart_err)?;
            }
            root.present().map_err(chart_err)?;
        }
        Ok(svg)
    }
}

pub(crate) fn chart_err<E: std::error::Error + Send + Sync>(
    e: DrawingAreaErrorKind<E>,
) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}

fn text_width(word: &str, font_size: f64) -> f64 {
    word.chars().count() as f64 * font_size * CHAR_WIDTH
}
