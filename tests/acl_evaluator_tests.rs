//! Queue ACL evaluation integration tests
//!
//! This test suite covers:
//! - The global ACL switch (disabled grants everything)
//! - Wildcard, user and group grants
//! - Omission of queues granting nothing
//! - The job-submission queue scenario with misspelled ACL keys
//!
//! IMPORTANT: an operation without a configured expression is denied. Keys
//! such as `acl-administrator-jobs` or `queue.qu1-acl-administer-jobs` do not
//! configure anything, so the affected operations stay denied.

use queue_acl::acl::{AclEvaluator, Identity, OperationKind, QueueAclStore, QueueAclsInfo};
use queue_acl::config::load_config_from_properties;
use std::sync::Arc;

const SUBMIT: OperationKind = OperationKind::SubmitJob;
const ADMIN: OperationKind = OperationKind::AdministerJobs;

// =============================================================================
// Test Helpers
// =============================================================================

fn store_from_properties(properties: &[(&str, &str)]) -> (QueueAclStore, bool) {
    let config = load_config_from_properties(properties.iter().copied()).unwrap();
    let store = QueueAclStore::from_config(&config).unwrap();
    (store, config.acls.enabled)
}

fn evaluate(store: &QueueAclStore, identity: &Identity, acls_enabled: bool) -> Vec<QueueAclsInfo> {
    AclEvaluator::new().compute_accessible_operations(identity, acls_enabled, store)
}

fn find<'a>(result: &'a [QueueAclsInfo], queue: &str) -> Option<&'a QueueAclsInfo> {
    result.iter().find(|info| info.queue_name() == queue)
}

fn queue_names(result: &[QueueAclsInfo]) -> Vec<&str> {
    result.iter().map(QueueAclsInfo::queue_name).collect()
}

/// Store where every queue grants both operations with the same expression
fn uniform_store(queues: &[(&str, &str)]) -> QueueAclStore {
    let mut builder = QueueAclStore::builder();
    for (queue, expression) in queues {
        builder = builder
            .queue(*queue)
            .acl(*queue, SUBMIT, *expression)
            .acl(*queue, ADMIN, *expression);
    }
    builder.build().unwrap()
}

// =============================================================================
// 1. Global ACL switch
// =============================================================================

mod acls_disabled {
    use super::*;

    #[test]
    fn test_disabled_grants_all_operations_on_all_queues() {
        let store = uniform_store(&[("qu1", "u1"), ("qu2", " g2"), ("qu3", "")]);

        for identity in [
            Identity::new("u1"),
            Identity::new("someone"),
            Identity::new(""),
            Identity::with_groups("x", ["g9"]),
        ] {
            let result = evaluate(&store, &identity, false);
            assert_eq!(queue_names(&result), vec!["qu1", "qu2", "qu3"]);
            for info in &result {
                assert_eq!(info.operations(), &[SUBMIT, ADMIN]);
            }
        }
    }

    #[test]
    fn test_disabled_includes_queues_without_any_acl() {
        let store = QueueAclStore::builder()
            .queue("bare1")
            .queue("bare2")
            .build()
            .unwrap();

        let result = evaluate(&store, &Identity::new("u1"), false);
        assert_eq!(queue_names(&result), vec!["bare1", "bare2"]);
    }

    #[test]
    fn test_disabled_is_stable_across_calls() {
        let store = uniform_store(&[("qu1", "u1")]);
        let identity = Identity::new("u2");
        assert_eq!(
            evaluate(&store, &identity, false),
            evaluate(&store, &identity, false)
        );
    }
}

// =============================================================================
// 2. Wildcard grants
// =============================================================================

mod wildcard {
    use super::*;

    #[test]
    fn test_wildcard_grants_any_identity() {
        let store = uniform_store(&[("open", "*")]);

        for identity in [
            Identity::new("anyone"),
            Identity::new(""),
            Identity::with_groups("grouped", ["g1", "g2"]),
        ] {
            let result = evaluate(&store, &identity, true);
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].operations(), &[SUBMIT, ADMIN]);
        }
    }

    #[test]
    fn test_wildcard_with_surrounding_whitespace() {
        let store = uniform_store(&[("open", "  *  ")]);
        let result = evaluate(&store, &Identity::new("anyone"), true);
        assert_eq!(result[0].operations(), &[SUBMIT, ADMIN]);
    }

    #[test]
    fn test_wildcard_inside_list_is_a_plain_name() {
        let store = uniform_store(&[("q", "*,u1")]);

        assert!(evaluate(&store, &Identity::new("anyone"), true).is_empty());
        assert_eq!(evaluate(&store, &Identity::new("u1"), true).len(), 1);
    }
}

// =============================================================================
// 3. User and group grants
// =============================================================================

mod user_and_group {
    use super::*;

    #[test]
    fn test_single_user() {
        let store = uniform_store(&[("qu1", "u1")]);

        let result = evaluate(&store, &Identity::new("u1"), true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].operations(), &[SUBMIT, ADMIN]);

        assert!(evaluate(&store, &Identity::new("u2"), true).is_empty());
    }

    #[test]
    fn test_user_listed_in_unrelated_group_list_is_not_a_group_member() {
        // u1 as user on qu1; "u1" as a group name on qu2
        let store = uniform_store(&[("qu1", "u1"), ("qu2", "u9 u1")]);

        let result = evaluate(&store, &Identity::new("u1"), true);
        assert_eq!(queue_names(&result), vec!["qu1"]);

        let other = evaluate(&store, &Identity::new("u2"), true);
        assert!(other.is_empty());
    }

    #[test]
    fn test_group_only_expression() {
        let store = uniform_store(&[("qu2", " g2")]);

        let member = evaluate(&store, &Identity::with_groups("u5", ["g1", "g2"]), true);
        assert_eq!(member.len(), 1);
        assert_eq!(member[0].operations(), &[SUBMIT, ADMIN]);

        // A user named like the group is not a member
        assert!(evaluate(&store, &Identity::new("g2"), true).is_empty());
    }

    #[test]
    fn test_users_and_groups_combined() {
        let store = uniform_store(&[("q", "u1,u2 g1,g2")]);

        assert_eq!(evaluate(&store, &Identity::new("u2"), true).len(), 1);
        assert_eq!(
            evaluate(&store, &Identity::with_groups("u9", ["g2"]), true).len(),
            1
        );
        assert!(evaluate(&store, &Identity::with_groups("u9", ["g3"]), true).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let store = uniform_store(&[("q", "Alice Admins")]);

        assert!(evaluate(&store, &Identity::new("alice"), true).is_empty());
        assert!(evaluate(&store, &Identity::with_groups("bob", ["admins"]), true).is_empty());
        assert_eq!(evaluate(&store, &Identity::new("Alice"), true).len(), 1);
    }

    #[test]
    fn test_empty_user_name_matches_only_by_group() {
        let store = uniform_store(&[("q1", "u1"), ("q2", " g1")]);

        assert!(evaluate(&store, &Identity::new(""), true).is_empty());
        let result = evaluate(&store, &Identity::with_groups("", ["g1"]), true);
        assert_eq!(queue_names(&result), vec!["q2"]);
    }

    #[test]
    fn test_operations_evaluated_independently() {
        let store = QueueAclStore::builder()
            .queue("q")
            .acl("q", SUBMIT, "u1")
            .acl("q", ADMIN, " ops")
            .build()
            .unwrap();

        let submitter = evaluate(&store, &Identity::new("u1"), true);
        assert_eq!(submitter[0].operations(), &[SUBMIT]);

        let operator = evaluate(&store, &Identity::with_groups("u2", ["ops"]), true);
        assert_eq!(operator[0].operations(), &[ADMIN]);

        let both = evaluate(&store, &Identity::with_groups("u1", ["ops"]), true);
        assert_eq!(both[0].operations(), &[SUBMIT, ADMIN]);
    }
}

// =============================================================================
// 4. Omission of queues
// =============================================================================

mod omission {
    use super::*;

    #[test]
    fn test_unconfigured_operation_is_denied() {
        let store = QueueAclStore::builder()
            .queue("q")
            .acl("q", SUBMIT, "*")
            .build()
            .unwrap();

        let result = evaluate(&store, &Identity::new("u1"), true);
        assert_eq!(result[0].operations(), &[SUBMIT]);
    }

    #[test]
    fn test_queue_without_acls_is_omitted() {
        let store = QueueAclStore::builder()
            .queue("bare")
            .queue("open")
            .acl("open", SUBMIT, "*")
            .build()
            .unwrap();

        let result = evaluate(&store, &Identity::new("u1"), true);
        assert_eq!(queue_names(&result), vec!["open"]);
    }

    #[test]
    fn test_empty_expression_is_denied() {
        let store = uniform_store(&[("q", ""), ("r", "   ")]);
        assert!(evaluate(&store, &Identity::new("u1"), true).is_empty());
    }

    #[test]
    fn test_result_never_contains_empty_operation_sets() {
        let store = uniform_store(&[("a", "u1"), ("b", "*"), ("c", " g1"), ("d", "")]);
        for identity in [
            Identity::new("u1"),
            Identity::new("u2"),
            Identity::with_groups("u3", ["g1"]),
        ] {
            for info in evaluate(&store, &identity, true) {
                assert!(!info.operations().is_empty());
            }
        }
    }

    #[test]
    fn test_result_follows_store_order() {
        let store = uniform_store(&[("zeta", "*"), ("alpha", "*"), ("mid", "*")]);
        let result = evaluate(&store, &Identity::new("u1"), true);
        assert_eq!(queue_names(&result), vec!["zeta", "alpha", "mid"]);
    }
}

// =============================================================================
// 5. Job-submission queue scenarios
// =============================================================================

mod scenarios {
    use super::*;

    /// Seven queues covering wildcard, single-user, mixed, unrelated-user,
    /// group-only and unconfigured queues
    fn scenario_store() -> QueueAclStore {
        QueueAclStore::builder()
            .queue("qu1")
            .acl("qu1", SUBMIT, "*")
            .acl("qu1", ADMIN, "*")
            .queue("qu2")
            .acl("qu2", SUBMIT, "u2")
            .acl("qu2", ADMIN, "u2")
            .queue("qu3")
            .acl("qu3", SUBMIT, "u2")
            .acl("qu3", ADMIN, "u1")
            .queue("qu4")
            .acl("qu4", SUBMIT, "u1")
            .acl("qu4", ADMIN, "u2")
            .queue("qu5")
            .acl("qu5", SUBMIT, "u1")
            .acl("qu5", ADMIN, "u1")
            .queue("qu6")
            .acl("qu6", SUBMIT, " g2")
            .acl("qu6", ADMIN, " g2")
            .queue("qu7")
            .build()
            .unwrap()
    }

    #[test]
    fn test_u2_with_acls_enabled() {
        let result = evaluate(&scenario_store(), &Identity::new("u2"), true);

        assert_eq!(queue_names(&result), vec!["qu1", "qu2", "qu3", "qu4"]);
        assert_eq!(find(&result, "qu1").unwrap().operations(), &[SUBMIT, ADMIN]);
        assert_eq!(find(&result, "qu2").unwrap().operations(), &[SUBMIT, ADMIN]);
        assert_eq!(find(&result, "qu3").unwrap().operations(), &[SUBMIT]);
        assert_eq!(find(&result, "qu4").unwrap().operations(), &[ADMIN]);
        assert!(find(&result, "qu5").is_none());
    }

    #[test]
    fn test_u2_with_acls_disabled() {
        let result = evaluate(&scenario_store(), &Identity::new("u2"), false);

        assert_eq!(
            queue_names(&result),
            vec!["qu1", "qu2", "qu3", "qu4", "qu5", "qu6", "qu7"]
        );
        for info in &result {
            assert_eq!(
                info.operation_names(),
                vec!["acl-submit-job", "acl-administer-jobs"]
            );
        }
    }

    #[test]
    fn test_group_member_with_acls_enabled() {
        let result = evaluate(&scenario_store(), &Identity::with_groups("u9", ["g2"]), true);
        assert_eq!(queue_names(&result), vec!["qu1", "qu6"]);
    }

    /// Queue configuration as a deployment would write it, including two
    /// misspelled administer keys and a hyphenated queue-level key
    fn deployment_properties(
        user: &str,
        groups: &str,
        acls_enabled: &str,
    ) -> Vec<(String, String)> {
        [
            ("acls.enabled", acls_enabled.to_string()),
            ("queue.names", "qu1,qu2,qu3,qu4,qu5,qu6,qu7".to_string()),
            ("queue.qu1.acl-submit-job", "*".to_string()),
            ("queue.qu1-acl-administer-jobs", "*".to_string()),
            ("queue.qu2.acl-submit-job", "u2".to_string()),
            ("queue.qu2.acl-administer-jobs", "u2".to_string()),
            ("queue.qu3.acl-submit-job", "u2".to_string()),
            ("queue.qu3.acl-administer-jobs", "*".to_string()),
            ("queue.qu4.acl-submit-job", "*".to_string()),
            ("queue.qu4.acl-administer-jobs", "u2".to_string()),
            ("queue.qu5.acl-submit-job", format!(" {}", groups)),
            ("queue.qu5.acl-administrator-jobs", format!(" {}", groups)),
            ("queue.qu6.acl-submit-job", user.to_string()),
            ("queue.qu6.acl-administrator-jobs", "u2".to_string()),
            ("queue.qu7.acl-submit-job", "u2".to_string()),
            ("queue.qu7.acl-administrator-jobs", user.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn load(properties: Vec<(String, String)>) -> (QueueAclStore, bool) {
        let config = load_config_from_properties(properties).unwrap();
        (QueueAclStore::from_config(&config).unwrap(), config.acls.enabled)
    }

    #[test]
    fn test_deployment_with_misspelled_keys_enabled() {
        let (store, acls_enabled) = load(deployment_properties("alice", "staff,dev", "true"));
        assert!(acls_enabled);
        let identity = Identity::with_groups("alice", ["staff", "dev"]);
        let result = evaluate(&store, &identity, acls_enabled);

        assert_eq!(queue_names(&result), vec!["qu1", "qu3", "qu4", "qu5", "qu6"]);
        assert_eq!(find(&result, "qu3").unwrap().operations(), &[ADMIN]);
        assert_eq!(find(&result, "qu4").unwrap().operations(), &[SUBMIT]);
        assert_eq!(find(&result, "qu6").unwrap().operations(), &[SUBMIT]);

        // Misspelled administer keys leave the operation unconfigured, so
        // these queues only grant submit and qu7 grants nothing
        assert_eq!(find(&result, "qu1").unwrap().operations(), &[SUBMIT]);
        assert_eq!(find(&result, "qu5").unwrap().operations(), &[SUBMIT]);
        assert!(find(&result, "qu7").is_none());
        assert_eq!(store.acl_expression("qu1", ADMIN), None);
        assert_eq!(store.acl_expression("qu5", ADMIN), None);
        assert_eq!(store.acl_expression("qu7", ADMIN), None);
    }

    #[test]
    fn test_deployment_with_misspelled_keys_disabled() {
        let (store, acls_enabled) = load(deployment_properties("alice", "staff,dev", "false"));
        assert!(!acls_enabled);
        let result = evaluate(&store, &Identity::new("alice"), acls_enabled);

        assert_eq!(result.len(), 7);
        for info in &result {
            assert_eq!(info.operations(), &[SUBMIT, ADMIN]);
        }
    }

    #[test]
    fn test_deployment_without_access() {
        let (store, acls_enabled) = store_from_properties(&[
            ("acls.enabled", "true"),
            ("queue.names", "qu1,qu2"),
            ("queue.qu1.acl-submit-job", "u1"),
            ("queue.qu1.acl-administer-jobs", "u1"),
            ("queue.qu2.acl-submit-job", " g2"),
            ("queue.qu2.acl-administer-jobs", " g2"),
        ]);

        let identity = Identity::with_groups("alice", ["staff", "dev"]);
        assert!(evaluate(&store, &identity, acls_enabled).is_empty());
    }
}

// =============================================================================
// 6. Single checks and concurrency
// =============================================================================

mod single_checks {
    use super::*;

    #[test]
    fn test_has_access_matches_bulk_result() {
        let store = uniform_store(&[("a", "u1"), ("b", "*"), ("c", " g1"), ("d", "")]);
        let evaluator = AclEvaluator::new();
        let identity = Identity::with_groups("u1", ["g1"]);
        let result = evaluate(&store, &identity, true);

        for queue in store.queue_names() {
            for &op in OperationKind::all() {
                let bulk = find(&result, queue).is_some_and(|info| info.allows(op));
                assert_eq!(
                    evaluator.has_access(&identity, true, &store, queue, op),
                    bulk,
                    "{} {}",
                    queue,
                    op
                );
            }
        }
    }

    #[test]
    fn test_concurrent_evaluation() {
        let store = Arc::new(uniform_store(&[("a", "u1"), ("b", "*"), ("c", " g1")]));

        std::thread::scope(|scope| {
            for i in 0..8 {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    let identity = if i % 2 == 0 {
                        Identity::new("u1")
                    } else {
                        Identity::with_groups("u2", ["g1"])
                    };
                    let expected = if i % 2 == 0 {
                        vec!["a", "b"]
                    } else {
                        vec!["b", "c"]
                    };
                    for _ in 0..100 {
                        let result = evaluate(&store, &identity, true);
                        assert_eq!(queue_names(&result), expected);
                    }
                });
            }
        });
    }
}
