//! WebAssembly exports for the pixel kernels.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Buffers
//! cross as `&mut [u8]`: wasm-bindgen copies the caller's `Uint8Array`
//! (or `Uint8ClampedArray` bytes) into linear memory and writes the result
//! back before returning, so from JS the call mutates the array in place.
//!
//! Shape errors surface as a thrown JS `Error`.

use std::sync::Once;

use log::info;
use wasm_bindgen::prelude::*;

use crate::filters::Filter;

static HOST_SETUP: Once = Once::new();

fn setup_host() {
    HOST_SETUP.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::default());
        info!("pixel kernels loaded");
    });
    crate::init();
}

#[wasm_bindgen(start)]
pub fn start() {
    setup_host();
}

/// Idempotent initialization entry point for hosts that sequence it
/// explicitly. Safe to call any number of times.
#[wasm_bindgen(js_name = initKernels)]
pub fn init_kernels() {
    setup_host();
}

// ============================================================================
// Filters
// ============================================================================

/// Convert RGBA bytes to grayscale in place.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[wasm_bindgen(js_name = grayscale)]
pub fn grayscale_wasm(data: &mut [u8], width: u32, height: u32) -> Result<(), JsError> {
    Ok(Filter::Grayscale.apply(data, width, height)?)
}

/// Invert the RGB channels of RGBA bytes in place.
#[wasm_bindgen(js_name = invert)]
pub fn invert_wasm(data: &mut [u8], width: u32, height: u32) -> Result<(), JsError> {
    Ok(Filter::Invert.apply(data, width, height)?)
}

/// Apply sepia tone to RGBA bytes in place.
#[wasm_bindgen(js_name = sepia)]
pub fn sepia_wasm(data: &mut [u8], width: u32, height: u32) -> Result<(), JsError> {
    Ok(Filter::Sepia.apply(data, width, height)?)
}

/// Apply a filter chosen by name (`"grayscale"`, `"invert"`, `"sepia"`).
#[wasm_bindgen(js_name = applyFilter)]
pub fn apply_filter_wasm(
    name: &str,
    data: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), JsError> {
    let filter: Filter = name.parse()?;
    Ok(filter.apply(data, width, height)?)
}

// ============================================================================
// Legacy Export Names
// ============================================================================

/// Same as `grayscale`, under the name earlier builds of the page import.
#[wasm_bindgen]
pub fn convert_to_grayscale(data: &mut [u8], width: u32, height: u32) -> Result<(), JsError> {
    grayscale_wasm(data, width, height)
}

/// Same as `invert`, under the name earlier builds of the page import.
#[wasm_bindgen]
pub fn invert_colors(data: &mut [u8], width: u32, height: u32) -> Result<(), JsError> {
    invert_wasm(data, width, height)
}
