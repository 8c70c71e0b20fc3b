use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::info;

/// Fixed output filename inside the caller-supplied directory.
pub const OUTPUT_FILENAME: &str = "wordcloud.png";

const MARGIN: u32 = 24;
const WORD_PADDING: u32 = 14;
const MIN_FONT_PX: f32 = 18.0;
const MAX_FONT_PX: f32 = 96.0;
const TEXT_COLOR: Rgba<u8> = Rgba([20u8, 20u8, 20u8, 255u8]);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render: corpus is empty after stopword filtering")]
    EmptyCorpus,

    #[error("font asset not found: {}", .0.display())]
    FontMissing(PathBuf),

    #[error("failed to load font asset {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("failed to write word cloud image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub font_path: PathBuf,
    pub background: Rgba<u8>,
    pub max_words: usize,
}

impl RenderOptions {
    pub fn new(font_path: PathBuf) -> Self {
        Self {
            width: 1200,
            height: 1200,
            font_path,
            background: Rgba([255, 255, 255, 255]),
            max_words: 150,
        }
    }
}

/// Rasterizes the corpus as a frequency-weighted word image and writes
/// `wordcloud.png` into `output_dir`, returning the written path.
///
/// Distinct failures: an empty corpus never reaches the rasterizer, a
/// missing or unparseable font is reported with its path, and an unwritable
/// output directory surfaces as a write error.
pub fn render_word_cloud(
    corpus: &str,
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<PathBuf, RenderError> {
    if corpus.trim().is_empty() {
        return Err(RenderError::EmptyCorpus);
    }

    let start_time = Instant::now();
    info!(
        action = "start",
        component = "word_cloud",
        output_dir = ?output_dir,
        "Generating word cloud"
    );

    let font = load_font(&options.font_path)?;
    let frequencies = word_frequencies(corpus);
    let (min_count, max_count) = count_bounds(&frequencies);

    let mut canvas = RgbaImage::from_pixel(options.width, options.height, options.background);
    let mut x = MARGIN;
    let mut y = MARGIN;
    let mut row_height = 0u32;
    let mut drawn = 0usize;

    for (word, count) in frequencies.iter().take(options.max_words) {
        let scale = PxScale::from(font_px(*count, min_count, max_count));
        let (word_w, word_h) = text_size(scale, &font, word);

        if x + word_w + MARGIN > options.width && x > MARGIN {
            x = MARGIN;
            y += row_height + WORD_PADDING;
            row_height = 0;
        }
        if y + word_h + MARGIN > options.height {
            break;
        }

        draw_text_mut(&mut canvas, TEXT_COLOR, x as i32, y as i32, scale, &font, word);
        x += word_w + WORD_PADDING;
        row_height = row_height.max(word_h);
        drawn += 1;
    }

    let output_path = output_dir.join(OUTPUT_FILENAME);
    if let Err(e) = fs::create_dir_all(output_dir) {
        return Err(RenderError::Write {
            path: output_path,
            source: image::ImageError::IoError(e),
        });
    }
    canvas.save(&output_path).map_err(|source| RenderError::Write {
        path: output_path.clone(),
        source,
    })?;

    info!(
        action = "complete",
        component = "word_cloud",
        words_drawn = drawn,
        output_path = ?output_path,
        duration_ms = start_time.elapsed().as_millis(),
        "Word cloud written"
    );
    Ok(output_path)
}

fn load_font(path: &Path) -> Result<FontVec, RenderError> {
    if !path.exists() {
        return Err(RenderError::FontMissing(path.to_path_buf()));
    }
    let data = fs::read(path).map_err(|e| RenderError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    FontVec::try_from_vec(data).map_err(|e| RenderError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Per-token counts in first-encountered order, then stable-sorted by count
/// descending so the most frequent words are placed first.
fn word_frequencies(corpus: &str) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut slot_by_word: HashMap<&str, usize> = HashMap::new();

    for token in corpus.split_whitespace() {
        match slot_by_word.get(token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slot_by_word.insert(token, counts.len());
                counts.push((token.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn count_bounds(frequencies: &[(String, u32)]) -> (u32, u32) {
    let max = frequencies.first().map_or(1, |(_, c)| *c);
    let min = frequencies.last().map_or(1, |(_, c)| *c);
    (min, max)
}

/// Linear size interpolation between the minimum and maximum counts.
fn font_px(count: u32, min_count: u32, max_count: u32) -> f32 {
    if max_count <= min_count {
        return (MIN_FONT_PX + MAX_FONT_PX) / 2.0;
    }
    let t = (count - min_count) as f32 / (max_count - min_count) as f32;
    MIN_FONT_PX + t * (MAX_FONT_PX - MIN_FONT_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_is_a_distinct_failure() {
        let options = RenderOptions::new(PathBuf::from("missing.ttf"));
        let err = render_word_cloud("", Path::new("."), &options).unwrap_err();
        assert!(matches!(err, RenderError::EmptyCorpus));

        // whitespace-only is also empty, and checked before font loading
        let err = render_word_cloud("   ", Path::new("."), &options).unwrap_err();
        assert!(matches!(err, RenderError::EmptyCorpus));
    }

    #[test]
    fn missing_font_reports_its_path() {
        let options = RenderOptions::new(PathBuf::from("/nonexistent/font.ttf"));
        let err = render_word_cloud("some words", Path::new("."), &options).unwrap_err();
        match err {
            RenderError::FontMissing(path) => {
                assert_eq!(path, PathBuf::from("/nonexistent/font.ttf"));
            }
            other => panic!("expected FontMissing, got {other:?}"),
        }
    }

    #[test]
    fn invalid_font_data_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let font_path = dir.path().join("bogus.ttf");
        fs::write(&font_path, b"not a font").unwrap();

        let options = RenderOptions::new(font_path);
        let err = render_word_cloud("some words", dir.path(), &options).unwrap_err();
        assert!(matches!(err, RenderError::FontLoad { .. }));
    }

    #[test]
    fn frequencies_sort_descending_with_stable_ties() {
        let freqs = word_frequencies("b a a c b a");
        assert_eq!(
            freqs,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn font_size_interpolates_between_bounds() {
        assert_eq!(font_px(1, 1, 1), (MIN_FONT_PX + MAX_FONT_PX) / 2.0);
        assert_eq!(font_px(1, 1, 5), MIN_FONT_PX);
        assert_eq!(font_px(5, 1, 5), MAX_FONT_PX);
    }
}
