//! Interaction extraction from create-command text.

use crate::grammar::ENTITY_BLOCK;

/// Parses create-command text into ordered (subject, rating) pairs.
///
/// Scans for entity blocks left to right. For each block the subject is
/// everything before the final two characters, whitespace-trimmed and with
/// the mention angle brackets stripped (`<@U23429987>` becomes `@U23429987`);
/// the rating is the block's last character. Subjects are not deduplicated,
/// so one person can appear several times in a batch.
///
/// A block may carry several consecutive rating characters ("Name ++"); only
/// the last one counts and the extras are ignored.
#[must_use]
pub fn extract(text: &str) -> Vec<(String, char)> {
    ENTITY_BLOCK
        .find_iter(text)
        .filter_map(|m| {
            let block = m.as_str();
            let mut tail = block.char_indices().rev();
            let (_, rating) = tail.next()?;
            let (cut, _) = tail.next()?;
            let subject = block[..cut].trim().replace(['<', '>'], "");
            Some((subject, rating))
        })
        .collect()
}
