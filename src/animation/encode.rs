//! Looping GIF encoding

use std::fs;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use super::AssemblyError;

/// Quantiser speed passed to the encoder (1 = best quality, 30 = fastest)
const ENCODER_SPEED: i32 = 10;

/// Encode `stills` as an endlessly looping GIF at `fps` and write it to
/// `output`. Returns the number of frames written.
pub fn encode_gif(stills: Vec<RgbaImage>, fps: u32, output: &Path) -> Result<usize, AssemblyError> {
    if stills.is_empty() {
        return Err(AssemblyError::NoFrames);
    }

    let count = stills.len();
    let delay = Delay::from_numer_denom_ms(1000, fps.max(1));

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, ENCODER_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(
            stills
                .into_iter()
                .map(|still| Frame::from_parts(still, 0, 0, delay)),
        )?;
    }

    fs::write(output, &bytes).map_err(|source| AssemblyError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    log::info!(
        "Wrote {} frames at {} fps to {} ({} bytes)",
        count,
        fps,
        output.display(),
        bytes.len()
    );
    Ok(count)
}
