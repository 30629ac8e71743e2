//! Probe integration tests.

#[cfg(test)]
mod tests {
    use grantprobe_core::input::targets_from_lines;
    use grantprobe_core::report::{Palette, Reporter};
    use grantprobe_core::{BucketName, Runner};

    use crate::{cleanup_bucket, s3_client, storage, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_emit_one_verdict_per_email() {
        let storage = storage("us-east-1");
        let name = test_bucket_name("probe");
        let targets = targets_from_lines("alice@x.com\n\n  \nbob@y.com\n".lines());
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), Palette::PLAIN);

        let summary = Runner::new(&storage, &mut reporter)
            .run(BucketName::new(name.clone()), &targets)
            .await
            .expect("run");
        assert_eq!(summary.probed(), 2);

        let (out, _) = reporter.into_inner();
        let out = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = out.lines().filter(|l| l.contains('@')).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("alice@x.com"));
        assert!(lines[1].contains("bob@y.com"));

        cleanup_bucket(&s3_client("us-east-1"), &name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_keep_owner_grant_after_probe() {
        let storage = storage("us-east-1");
        let name = test_bucket_name("acl");
        let targets = targets_from_lines(["user@example.com"]);
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), Palette::PLAIN);

        Runner::new(&storage, &mut reporter)
            .run(BucketName::new(name.clone()), &targets)
            .await
            .expect("run");

        let client = s3_client("us-east-1");
        let acl = client
            .get_bucket_acl()
            .bucket(&name)
            .send()
            .await
            .expect("get_bucket_acl");
        assert!(acl.owner().is_some(), "owner should survive republish");
        assert!(!acl.grants().is_empty(), "owner grant should survive republish");

        cleanup_bucket(&client, &name).await;
    }
}
