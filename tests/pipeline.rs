//! Pipeline integration tests against scripted tools.

mod common;

use std::sync::Arc;

use common::{test_config, Behavior, ScriptedRunner};
use webtoapk::pipeline::{BuildPipeline, BuildRequest, Error};

fn request(app_name: &str, website_url: &str) -> BuildRequest {
    BuildRequest {
        app_name: app_name.into(),
        website_url: website_url.into(),
        icon: None,
    }
}

fn pipeline_with(
    output_root: &std::path::Path,
    packaging: Behavior,
    signing: Behavior,
) -> (BuildPipeline, Arc<ScriptedRunner>) {
    let runner = Arc::new(ScriptedRunner::new(packaging, signing));
    let pipeline =
        BuildPipeline::with_runner(test_config(output_root), runner.clone()).unwrap();
    (pipeline, runner)
}

#[tokio::test]
async fn missing_fields_leave_no_side_effects() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, runner) =
        pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);

    let err = pipeline.build(request("", "")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));

    // No directory was created and no tool ran
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    assert!(runner.invoked().is_empty());
}

#[tokio::test]
async fn hostile_app_name_leaves_no_side_effects() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, runner) =
        pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);

    let err = pipeline
        .build(request("../escape", "https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier { .. }));
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    assert!(runner.invoked().is_empty());
}

#[tokio::test]
async fn undecodable_icon_leaves_no_side_effects() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, runner) =
        pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);

    let mut req = request("Demo App", "https://example.com");
    req.icon = Some(bytes::Bytes::from_static(b"definitely not an image"));

    let err = pipeline.build(req).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    assert!(runner.invoked().is_empty());
}

#[tokio::test]
async fn building_twice_reuses_the_project_directory() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, _) = pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);

    let first = pipeline
        .build(request("Demo App", "https://example.com"))
        .await
        .unwrap();
    let second = pipeline
        .build(request("Demo App", "https://other.example"))
        .await
        .unwrap();

    assert_eq!(first.project_dir, second.project_dir);

    // Last write wins inside the shared directory
    let activity = std::fs::read_to_string(
        second.project_dir.join("MainActivity.java"),
    )
    .unwrap();
    assert!(activity.contains("https://other.example"));
}

#[tokio::test]
async fn packaging_failure_carries_stderr_and_skips_signing() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, runner) =
        pipeline_with(root.path(), Behavior::Fail("boom"), Behavior::Succeed);

    let err = pipeline
        .build(request("Demo App", "https://example.com"))
        .await
        .unwrap_err();

    match err {
        Error::Packaging { stderr } => assert_eq!(stderr, "boom"),
        other => panic!("expected Packaging error, got {other:?}"),
    }
    assert_eq!(runner.invoked(), vec!["apktool".to_string()]);
}

#[tokio::test]
async fn signing_failure_carries_stderr() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, runner) =
        pipeline_with(root.path(), Behavior::Succeed, Behavior::Fail("sign fail"));

    let err = pipeline
        .build(request("Demo App", "https://example.com"))
        .await
        .unwrap_err();

    match err {
        Error::Signing { stderr } => assert_eq!(stderr, "sign fail"),
        other => panic!("expected Signing error, got {other:?}"),
    }
    assert_eq!(
        runner.invoked(),
        vec!["apktool".to_string(), "apksigner".to_string()]
    );
}

#[tokio::test]
async fn demo_app_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, runner) = pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);

    let outcome = pipeline
        .build(request("Demo App", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(outcome.identity.slug, "Demo_App");
    assert_eq!(outcome.identity.package_id, "com.webtoapk.demo_app");

    let manifest =
        std::fs::read_to_string(outcome.project_dir.join("AndroidManifest.xml")).unwrap();
    assert!(manifest.contains("com.webtoapk.demo_app"));
    assert!(manifest.contains(r#"android:label="Demo App""#));
    assert!(manifest.contains("android.permission.INTERNET"));

    let activity =
        std::fs::read_to_string(outcome.project_dir.join("MainActivity.java")).unwrap();
    assert!(activity.contains("package com.webtoapk.demo_app;"));
    assert!(activity.contains("https://example.com"));

    assert_eq!(
        runner.invoked(),
        vec!["apktool".to_string(), "apksigner".to_string()]
    );

    assert!(outcome.signed_apk.ends_with("Demo_App/Demo_App-signed.apk"));
    let signed = std::fs::metadata(&outcome.signed_apk).unwrap();
    assert!(signed.len() > 0);
    assert_eq!(outcome.size, signed.len());
    assert_eq!(outcome.checksum.len(), 64);
}

#[tokio::test]
async fn uploaded_icon_lands_in_the_project_directory() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, _) = pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);

    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        8,
        image::Rgba([0, 128, 255, 255]),
    ));
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let mut req = request("Icon App", "https://example.com");
    req.icon = Some(bytes::Bytes::from(png));

    let outcome = pipeline.build(req).await.unwrap();
    let icon_path = outcome.project_dir.join("ic_launcher.png");
    assert!(icon_path.exists());
    assert!(image::open(&icon_path).is_ok());
}

#[tokio::test]
async fn concurrent_same_name_builds_both_succeed() {
    let root = tempfile::tempdir().unwrap();
    let (pipeline, _) = pipeline_with(root.path(), Behavior::Succeed, Behavior::Succeed);
    let pipeline = Arc::new(pipeline);

    let mut handles = Vec::new();
    for i in 0..4 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            pipeline
                .build(request("Same App", &format!("https://example.com/{i}")))
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}
