use kc_core::clipping::{Clipping, ClippingKey, Definition};

use super::collection::LiveCollection;

/// The clipping list of one view.
pub type ClippingBoard = LiveCollection<Clipping>;

impl LiveCollection<Clipping> {
    /// Marks the clippings named by `order` that still await a lookup as
    /// scheduled and returns their keys and lookup words in `order`.
    ///
    /// Board position plays no part, so pages that arrived out of order do
    /// not change the numbering. Claiming is atomic, so two schedulers never
    /// both pick the same clipping.
    pub async fn claim_unattempted(&self, order: &[ClippingKey]) -> Vec<(ClippingKey, String)> {
        self.mutate(|clippings| {
            order
                .iter()
                .filter_map(|key| {
                    let clipping = clippings
                        .iter_mut()
                        .find(|c| c.source == key.source && c.id == key.id)?;
                    if !clipping.awaits_lookup() {
                        return None;
                    }
                    let word = clipping.lookup_word.clone()?;
                    clipping.mark_scheduled();
                    Some((key.clone(), word))
                })
                .collect()
        })
        .await
        .unwrap_or_default()
    }

    /// Settles the lookup of the clipping identified by `key`, leaving every
    /// other clipping untouched. Returns `false` when the view is gone or no
    /// such clipping exists.
    pub async fn settle_definition(&self, key: &ClippingKey, definition: Option<Definition>) -> bool {
        self.mutate(|clippings| {
            match clippings.iter_mut().find(|c| c.source == key.source && c.id == key.id) {
                Some(clipping) => {
                    clipping.settle_definition(definition);
                    true
                }
                None => false,
            }
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_core::clipping::{normalize_record, LookupStatus, RawClippingRecord};
    use kc_core::SourceId;
    use tokio_util::sync::CancellationToken;

    fn clipping(id: i64, content: &str, created: &str) -> Clipping {
        normalize_record(
            &SourceId::from("clippings"),
            RawClippingRecord {
                id,
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                content: content.to_string(),
                created: created.to_string(),
                location: "100".to_string(),
            },
        )
    }

    fn keys(clippings: &[Clipping]) -> Vec<ClippingKey> {
        clippings.iter().map(Clipping::key).collect()
    }

    #[tokio::test]
    async fn test_claim_marks_only_eligible_clippings_once() {
        let board = ClippingBoard::new(CancellationToken::new());
        let clippings = vec![
            clipping(1, "kwisatz", "01/01/2020 1:00 PM"),
            clipping(2, "Fear is the mind-killer.", "01/01/2020 1:00 PM"),
            clipping(3, "spices", "01/01/2020 1:00 PM"),
        ];
        let order = keys(&clippings);
        board.extend(clippings).await;

        let claimed = board.claim_unattempted(&order).await;
        let words: Vec<&str> = claimed.iter().map(|(_, w)| w.as_str()).collect();
        assert_eq!(words, vec!["kwisatz", "spice"]);
        assert!(board.claim_unattempted(&order).await.is_empty());

        let statuses: Vec<LookupStatus> = board.snapshot().await.iter().map(|c| c.lookup).collect();
        assert_eq!(
            statuses,
            vec![LookupStatus::Scheduled, LookupStatus::Ineligible, LookupStatus::Scheduled]
        );
    }

    #[tokio::test]
    async fn test_claim_follows_given_order_not_board_order() {
        let board = ClippingBoard::new(CancellationToken::new());
        let clippings = vec![
            clipping(1, "kwisatz", "01/01/2020 1:00 PM"),
            clipping(2, "haderach", "01/01/2020 1:00 PM"),
            clipping(3, "melange", "01/01/2020 1:00 PM"),
        ];
        let order = vec![clippings[2].key(), clippings[0].key()];
        board.extend(clippings).await;

        let claimed = board.claim_unattempted(&order).await;
        let words: Vec<&str> = claimed.iter().map(|(_, w)| w.as_str()).collect();
        assert_eq!(words, vec!["melange", "kwisatz"]);

        // Clippings left out of the order stay unattempted.
        let board_now = board.snapshot().await;
        assert_eq!(board_now[1].lookup, LookupStatus::Unattempted);
    }

    #[tokio::test]
    async fn test_settle_touches_only_the_owner() {
        let board = ClippingBoard::new(CancellationToken::new());
        board
            .extend(vec![
                clipping(1, "kwisatz", "01/01/2020 1:00 PM"),
                clipping(2, "haderach", "01/01/2020 1:00 PM"),
            ])
            .await;
        let before = board.snapshot().await;
        let key = before[1].key();

        let definition = Definition {
            text: "a prophesied one".to_string(),
            attribution: "from a dictionary".to_string(),
        };
        assert!(board.settle_definition(&key, Some(definition.clone())).await);

        let after = board.snapshot().await;
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].definition, Some(definition));
        assert_eq!(after[1].lookup, LookupStatus::Resolved);
    }
}
