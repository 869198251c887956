use crate::mp3::AudioBuffer;
use crate::song::TrackSpec;
use crate::timestamp::Timestamp;

/// MPEG-2 Layer III, 8 kbps, 24 kHz, mono: 24 bytes and exactly 24 ms per frame.
pub const FRAME_LEN: usize = 24;
pub const FRAME: [u8; FRAME_LEN] = [
    0xFF, 0xF3, 0x14, 0xC0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
pub const FRAME_MILLIS: u64 = 24;

pub fn synthetic_mp3(num_frames: usize) -> Vec<u8> {
    FRAME.iter().copied().cycle().take(num_frames * FRAME_LEN).collect()
}

pub fn buffer_of_millis(millis: u64) -> AudioBuffer {
    AudioBuffer::from_bytes(synthetic_mp3((millis / FRAME_MILLIS) as usize)).unwrap()
}

pub fn tracks(entries: &[(&str, u64)]) -> Vec<TrackSpec> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (title, start_millis))| TrackSpec {
            number: i + 1,
            title: title.to_string(),
            start: Timestamp::from_millis(*start_millis),
        })
        .collect()
}
