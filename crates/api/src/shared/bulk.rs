use kurator_domain::BulkResult;
use std::{fmt::Display, future::Future};

/// Applies `op` to every id in order and aggregates the per item outcomes.
///
/// A failing item never stops the remaining ones. The failure reason of an item
/// is the `Display` output of its error.
pub async fn apply_all<F, Fut, E>(ids: Vec<String>, mut op: F) -> BulkResult
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let mut result = BulkResult::default();
    for id in ids {
        match op(id.clone()).await {
            Ok(()) => result.record_success(id),
            Err(e) => result.record_failure(id, e),
        }
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use kurator_domain::BulkFailure;

    #[actix_web::main]
    #[test]
    async fn it_continues_after_failures() {
        let mut seen = Vec::new();
        let res = apply_all(
            vec!["a".to_string(), "bad".to_string(), "c".to_string()],
            |id| {
                seen.push(id.clone());
                async move {
                    if id == "bad" {
                        Err("NotFound")
                    } else {
                        Ok(())
                    }
                }
            },
        )
        .await;

        assert_eq!(seen, vec!["a", "bad", "c"]);
        assert_eq!(res.succeeded, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(
            res.failed,
            vec![BulkFailure {
                id: "bad".into(),
                reason: "NotFound".into()
            }]
        );
    }

    #[actix_web::main]
    #[test]
    async fn empty_input_is_a_complete_success() {
        let res = apply_all(Vec::new(), |_| async { Ok::<(), String>(()) }).await;
        assert!(res.succeeded.is_empty());
        assert!(res.failed.is_empty());
    }
}
