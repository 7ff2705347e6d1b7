//! Request ordering for dashboard panels.

/// Sequence numbers handed out per panel. A response is applied only when it
/// carries the latest number, so switching the date range or KOL sort twice
/// quickly cannot leave the older answer on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSeq {
    issued: u64,
}

impl PanelSeq {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_request_is_latest() {
        let mut seq = PanelSeq::default();
        let clicks = seq.issue();
        let orders = seq.issue();

        // `orders` answers first, then the slower `clicks` reply lands.
        assert!(seq.is_latest(orders));
        assert!(!seq.is_latest(clicks));
    }

    #[test]
    fn nothing_is_latest_before_the_first_request() {
        let seq = PanelSeq::default();
        assert!(!seq.is_latest(1));
    }

    #[test]
    fn numbers_strictly_increase() {
        let mut seq = PanelSeq::default();
        let issued: Vec<u64> = (0..4).map(|_| seq.issue()).collect();
        assert_eq!(issued, vec![1, 2, 3, 4]);
        assert!(seq.is_latest(4));
    }
}
