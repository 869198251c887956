use std::fs::File;
use std::io::{self, Cursor};
use std::ops::Range;
use std::path::Path;

use log::debug;
use symphonia::core::codecs::CODEC_TYPE_MP3;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio_time::AudioTime;
use crate::errors::SplitError;
use crate::timestamp::Timestamp;

/// One MPEG audio frame, header included, and the sample it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub start_sample: u64,
    pub data: Box<[u8]>,
}

/// The source recording as a sequence of MPEG audio frames.
///
/// Tags around the stream, junk between frames and a leading Xing/Info header
/// frame are left out by the demuxer, so every frame here carries audio.
pub struct AudioBuffer {
    frames: Vec<Frame>,
    sample_rate: u32,
    total_samples: u64,
}

impl AudioBuffer {
    pub fn open(path: &Path) -> Result<AudioBuffer, SplitError> {
        let file = File::open(path).map_err(|e| SplitError::io(path, e))?;
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }
        let buffer = AudioBuffer::read(Box::new(file), &hint)?;
        debug!(
            "Read {} frames ({}) at {} Hz from {:?}",
            buffer.num_frames(),
            buffer.duration(),
            buffer.sample_rate(),
            path
        );
        Ok(buffer)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<AudioBuffer, SplitError> {
        AudioBuffer::read(Box::new(Cursor::new(data)), &Hint::new())
    }

    fn read(source: Box<dyn MediaSource>, hint: &Hint) -> Result<AudioBuffer, SplitError> {
        let mss = MediaSourceStream::new(source, MediaSourceStreamOptions::default());
        let probed = symphonia::default::get_probe().format(
            hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format = probed.format;
        let track = format
            .default_track()
            .ok_or_else(|| SplitError::InvalidAudio("no audio track found".into()))?;
        if track.codec_params.codec != CODEC_TYPE_MP3 {
            return Err(SplitError::InvalidAudio(
                "audio track is not MPEG Layer III".into(),
            ));
        }
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| SplitError::InvalidAudio("unknown sample rate".into()))?;

        let mut frames = vec![];
        let mut total_samples = 0;
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    break
                }
                Err(e) => return Err(e.into()),
            };
            if packet.track_id() != track_id {
                continue;
            }
            total_samples = packet.ts + packet.dur;
            frames.push(Frame {
                start_sample: packet.ts,
                data: packet.data,
            });
        }
        if frames.is_empty() {
            return Err(SplitError::InvalidAudio("no MPEG audio frames found".into()));
        }
        Ok(AudioBuffer {
            frames,
            sample_rate,
            total_samples,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn end(&self) -> AudioTime {
        AudioTime::from_samples(self.total_samples, self.sample_rate)
    }

    pub fn duration(&self) -> Timestamp {
        self.end().as_timestamp()
    }

    /// Start of the frame with the given index. One past the last frame is the end of the buffer.
    pub fn frame_start(&self, index: usize) -> AudioTime {
        match self.frames.get(index) {
            Some(frame) => AudioTime::from_samples(frame.start_sample, self.sample_rate),
            None => self.end(),
        }
    }

    /// Index of the first frame starting at or after `time`.
    pub fn frame_at_or_after(&self, time: AudioTime) -> usize {
        self.frames
            .partition_point(|frame| frame.start_sample < time.sample_num)
    }

    pub fn frame_bytes(&self, frames: Range<usize>) -> impl Iterator<Item = &[u8]> + '_ {
        self.frames[frames].iter().map(|frame| &frame.data[..])
    }
}

#[cfg(test)]
mod tests {
    use id3::{Tag, TagLike, Version};

    use super::*;
    use crate::test_utils::{synthetic_mp3, FRAME};

    /// MPEG-1 Layer III, 128 kbps, 44.1 kHz: a plausible header with nothing valid after it.
    fn false_sync() -> Vec<u8> {
        let mut frame = vec![0xFF, 0xFB, 0x90, 0x64];
        frame.resize(417, 0);
        frame
    }

    #[test]
    fn counts_frames_and_duration() {
        let buffer = AudioBuffer::from_bytes(synthetic_mp3(1000)).unwrap();
        assert_eq!(buffer.num_frames(), 1000);
        assert_eq!(buffer.sample_rate(), 24_000);
        assert_eq!(buffer.duration(), Timestamp::from_millis(24_000));
        assert_eq!(buffer.frame_start(1).sample_num, 576);
    }

    #[test]
    fn skips_tags_around_the_stream() {
        let mut tag = Tag::new();
        tag.set_title("Whole Album");
        let mut data = vec![];
        tag.write_to(&mut data, Version::Id3v24).unwrap();
        data.extend(synthetic_mp3(10));
        data.extend_from_slice(b"TAG");
        data.extend(std::iter::repeat(b' ').take(125));
        let buffer = AudioBuffer::from_bytes(data).unwrap();
        assert_eq!(buffer.num_frames(), 10);
        assert_eq!(buffer.duration(), Timestamp::from_millis(240));
        assert!(buffer.frame_bytes(0..10).all(|frame| frame == FRAME));
    }

    #[test]
    fn false_sync_in_leading_junk_keeps_the_real_stream() {
        let mut data = false_sync();
        data.extend(synthetic_mp3(1000));
        let buffer = AudioBuffer::from_bytes(data).unwrap();
        assert_eq!(buffer.sample_rate(), 24_000);
        assert_eq!(buffer.num_frames(), 1000);
        assert_eq!(buffer.duration(), Timestamp::from_millis(24_000));
    }

    #[test]
    fn drops_vbr_info_frame() {
        let mut info_frame = FRAME.to_vec();
        // MPEG-2 mono: 4 header bytes + 9 bytes side info
        info_frame[13..17].copy_from_slice(b"Info");
        let mut data = info_frame;
        data.extend(synthetic_mp3(3));
        let buffer = AudioBuffer::from_bytes(data).unwrap();
        assert_eq!(buffer.num_frames(), 3);
    }

    #[test]
    fn rejects_data_without_frames() {
        let result = AudioBuffer::from_bytes(b"definitely not an mp3".to_vec());
        assert!(matches!(
            result,
            Err(SplitError::Audio(_)) | Err(SplitError::InvalidAudio(_))
        ));
    }

    #[test]
    fn finds_frames_by_time() {
        let buffer = AudioBuffer::from_bytes(synthetic_mp3(10)).unwrap();
        let at = |millis| AudioTime::from_timestamp(Timestamp::from_millis(millis), 24_000);
        assert_eq!(buffer.frame_at_or_after(at(0)), 0);
        assert_eq!(buffer.frame_at_or_after(at(24)), 1);
        assert_eq!(buffer.frame_at_or_after(at(25)), 2);
        assert_eq!(buffer.frame_at_or_after(at(240)), 10);
        assert_eq!(buffer.frame_start(10), buffer.end());
    }

    #[test]
    fn opens_files_with_extension_hint() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rip.mp3");
        std::fs::write(&file, synthetic_mp3(50)).unwrap();
        let buffer = AudioBuffer::open(&file).unwrap();
        assert_eq!(buffer.duration(), Timestamp::from_millis(1_200));
        let missing = AudioBuffer::open(&dir.path().join("missing.mp3"));
        assert!(matches!(missing, Err(SplitError::Io { .. })));
    }
}
