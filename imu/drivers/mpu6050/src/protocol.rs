//! The text protocol printed by the MPU6050 DMP firmware.
//!
//! Lines of interest look like `ypr\t<yaw>\t<pitch>\t<roll>`. Everything
//! else on the wire (boot banners, calibration chatter, partial lines) is
//! accepted and ignored.

use imu::OrientationState;

pub const TAG: &str = "ypr";
pub const FIELD_SEPARATOR: char = '\t';
const FIELD_COUNT: usize = 4;

/// Decodes UTF-8, dropping any byte sequence that is not valid.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Parses one line into a full orientation, or `None` if the line is not a
/// well-formed `ypr` reading. Never yields a partially parsed triple.
pub fn parse_line(line: &str) -> Option<OrientationState> {
    let line = line.trim();
    if !line.starts_with(TAG) {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT || fields[0] != TAG {
        return None;
    }

    Some(OrientationState::new(
        parse_angle(fields[1])?,
        parse_angle(fields[2])?,
        parse_angle(fields[3])?,
    ))
}

fn parse_angle(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let state = parse_line("ypr\t10.5\t-3.25\t180.0").unwrap();
        assert_eq!(state, OrientationState::new(10.5, -3.25, 180.0));
    }

    #[test]
    fn tolerates_line_endings_and_padding() {
        let state = parse_line("  ypr\t1\t 2 \t3\r\n").unwrap();
        assert_eq!(state, OrientationState::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn keeps_angles_outside_one_turn() {
        let state = parse_line("ypr\t-725.5\t361\t1e3").unwrap();
        assert_eq!(state, OrientationState::new(-725.5, 361.0, 1000.0));
    }

    #[test]
    fn rejects_lines_without_tag() {
        assert_eq!(parse_line("noise"), None);
        assert_eq!(parse_line("garbage\t1\t2\t3"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("quat\t1\t0\t0\t0"), None);
    }

    #[test]
    fn rejects_tag_with_suffix() {
        assert_eq!(parse_line("yprx\t1\t2\t3"), None);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(parse_line("ypr\t1\t2"), None);
        assert_eq!(parse_line("ypr\t1\t2\t3\t4"), None);
        assert_eq!(parse_line("ypr 1 2 3"), None);
    }

    #[test]
    fn rejects_any_non_numeric_field() {
        assert_eq!(parse_line("ypr\tabc\t2\t3"), None);
        assert_eq!(parse_line("ypr\t1\tabc\t3"), None);
        assert_eq!(parse_line("ypr\t1\t2\tabc"), None);
        assert_eq!(parse_line("ypr\t1\t\t3"), None);
    }

    #[test]
    fn decode_drops_invalid_bytes() {
        let raw = b"yp\xffr\t1\t2\xc3\t3\n";
        assert_eq!(decode_lossy(raw), "ypr\t1\t2\t3\n");
    }

    #[test]
    fn decode_keeps_valid_multibyte_text() {
        assert_eq!(decode_lossy("Température ok".as_bytes()), "Température ok");
        assert_eq!(decode_lossy(b"\x80\x80"), "");
    }
}
