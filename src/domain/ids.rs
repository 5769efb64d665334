use chrono::Local;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a record id of the form `{kind}-{epoch_millis}-{suffix}`.
///
/// Timestamp plus a 9-character base36 suffix, no collision check. Unique
/// enough for single-user local data; not cryptographically guaranteed.
pub fn new_record_id(kind: &str) -> String {
    let millis = Local::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}-{}", kind, millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = new_record_id("task");
        let parts: Vec<&str> = id.splitn(3, '-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_ids_differ() {
        let a = new_record_id("task");
        let b = new_record_id("task");
        assert_ne!(a, b);
    }
}
