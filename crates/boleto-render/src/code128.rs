//! # Code 128 Rasterizer
//!
//! PNG rendering through `barcoders`.
//!
//! ## Charset Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code 128 needs a start charset, given as a prefix character:          │
//! │                                                                         │
//! │    'Ɓ' charset B  - printable ASCII, one symbol per character          │
//! │    'Ć' charset C  - digit pairs, one symbol per TWO digits             │
//! │                                                                         │
//! │  44-digit payloads always take charset C: half the symbols, a barcode  │
//! │  half as wide. Odd-length or non-digit input falls back to B.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use barcoders::generators::image::Image;
use barcoders::sym::code128::Code128;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::{Rasterizer, Symbology};

/// Start-charset prefix for charset B.
const CHARSET_B: char = 'Ɓ';

/// Start-charset prefix for charset C.
const CHARSET_C: char = 'Ć';

/// Default image height in pixels.
pub const DEFAULT_HEIGHT: u32 = 80;

/// Renders Code 128 barcodes as PNG.
#[derive(Debug, Clone, Copy)]
pub struct Code128Rasterizer {
    height: u32,
}

impl Code128Rasterizer {
    /// Creates a rasterizer producing images `height` pixels tall.
    pub fn new(height: u32) -> Self {
        Code128Rasterizer { height }
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for Code128Rasterizer {
    fn default() -> Self {
        Code128Rasterizer::new(DEFAULT_HEIGHT)
    }
}

impl Rasterizer for Code128Rasterizer {
    fn rasterize(&self, symbology: Symbology, payload: &str) -> RenderResult<Vec<u8>> {
        if payload.is_empty() {
            return Err(RenderError::EmptyPayload);
        }

        let data = with_charset(payload);
        let barcode = match symbology {
            Symbology::Code128 => Code128::new(&data).map_err(|e| RenderError::Encode {
                symbology,
                reason: e.to_string(),
            })?,
        };

        let modules = barcode.encode();
        let bytes = Image::png(self.height)
            .generate(&modules[..])
            .map_err(|e| RenderError::Image(e.to_string()))?;

        debug!(
            %symbology,
            payload_len = payload.len(),
            modules = modules.len(),
            png_bytes = bytes.len(),
            "Barcode rendered"
        );

        Ok(bytes)
    }
}

/// Prefixes the payload with the densest charset that can encode it.
fn with_charset(payload: &str) -> String {
    let numeric_pairs = payload.len() % 2 == 0 && payload.bytes().all(|b| b.is_ascii_digit());
    let charset = if numeric_pairs { CHARSET_C } else { CHARSET_B };

    let mut data = String::with_capacity(payload.len() + charset.len_utf8());
    data.push(charset);
    data.push_str(payload);
    data
}

// =============================================================================
// Unit Tests
// =============================================================================
