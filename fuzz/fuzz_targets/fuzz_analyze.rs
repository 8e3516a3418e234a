#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetcade_analysis::{analyze, PixelBuffer};
use sheetcade_spec::{DetectionMode, DetectionOptions, EmptyCellPolicy};

// Layout: [width, height, mode, fw, fh, count, policy, pixels...]
fuzz_target!(|data: &[u8]| {
    if data.len() < 7 {
        return;
    }
    let width = (data[0] % 64) as u32 + 1;
    let height = (data[1] % 64) as u32 + 1;
    let mode = match data[2] % 3 {
        0 => DetectionMode::Alpha,
        1 => DetectionMode::BlackBorder,
        _ => DetectionMode::Manual,
    };

    let mut options = DetectionOptions {
        mode,
        ..DetectionOptions::default()
    }
    .with_min_size(1, 1);
    if data[3] > 0 && data[4] > 0 {
        options = options.with_grid(data[3] as u32, data[4] as u32, data[5] as u32);
    }
    if data[6] % 2 == 1 {
        options = options.with_empty_cell_policy(EmptyCellPolicy::Drop);
    }

    let len = (width * height * 4) as usize;
    let mut pixels: Vec<u8> = data[7..].iter().copied().cycle().take(len).collect();
    pixels.resize(len, 0);
    let Ok(buffer) = PixelBuffer::from_rgba8(width, height, pixels) else {
        return;
    };

    if let Ok(result) = analyze(&buffer, &options) {
        if let Some(hint) = options.grid_hint() {
            assert!(result.frames.len() <= hint.frame_count as usize);
        }
    }
});
