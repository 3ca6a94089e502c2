/*!
 * Integration tests for planning a series directory
 */

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::common;
use crate::common::mock_probe::{track, MockTrackProbe};
use mixsub::alignment::SubtitleStrategy;
use mixsub::app_config::Config;
use mixsub::app_controller::{Controller, PlanReport, Selection};
use mixsub::errors::AlignError;

fn controller(config: Config, probe: MockTrackProbe) -> Result<Controller> {
    common::init_test_logging();
    Controller::with_probe(config, Arc::new(probe))
}

fn plan(controller: &Controller, dir: &std::path::Path, selection: &Selection) -> Result<PlanReport> {
    tokio_test::block_on(controller.plan(dir, selection))
}

/// Test a complete release: every video gets its subtitle and comment file
#[test]
fn test_plan_withCompleteSeries_shouldPlanEveryEpisode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(
        dir,
        &[
            "A01.mkv", "A02.mkv", "A03.mkv",
            "A01.ass", "A02.chs.ass", "A03.ass",
            "c1.xml", "c2.xml", "c3.xml",
        ],
    )?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(report.strategy, SubtitleStrategy::Ranked);
    assert_eq!(report.halted_at, None);
    assert_eq!(report.episodes.len(), 3);

    let second = &report.episodes[1];
    assert_eq!(second.episode, 2);
    assert_eq!(second.video, dir.join("A02.mkv"));
    assert_eq!(second.subtitle, Some(dir.join("A02.chs.ass").display().to_string()));
    assert_eq!(second.comments, dir.join("c2.xml"));
    assert_eq!(second.output, dir.join("A02.danmaku.ass"));

    Ok(())
}

/// Test that outputs of a previous run are not offered as subtitles
#[test]
fn test_plan_withPreviousOutputs_shouldIgnoreThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(
        dir,
        &["A01.mkv", "A02.mkv", "A01.danmaku.ass", "A02.danmaku.ass", "1.xml", "2.xml"],
    )?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(report.episodes.len(), 2);
    assert!(report.episodes.iter().all(|e| e.subtitle.is_none()));
    Ok(())
}

/// Test that a missing comment file stops planning instead of skipping the episode
#[test]
fn test_plan_withFewerCommentFiles_shouldStopAtFirstMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(
        dir,
        &["Ep 1.mkv", "Ep 2.mkv", "Ep 3.mkv", "Ep 4.mkv", "c1.xml", "c2.xml"],
    )?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let report = plan(&controller, dir, &Selection::all())?;

    let planned: Vec<usize> = report.episodes.iter().map(|e| e.episode).collect();
    assert_eq!(planned, vec![1, 2]);
    assert_eq!(report.halted_at, Some(3));
    Ok(())
}

/// Test that a missing subtitle only produces a warning
#[test]
fn test_plan_withoutSubtitles_shouldPlanEpisodesWithoutSubtitle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(dir, &["Ep 1.mkv", "Ep 2.mkv", "1.json", "2.json"])?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(report.strategy, SubtitleStrategy::Positional);
    assert_eq!(report.episodes.len(), 2);
    assert!(report.episodes.iter().all(|e| e.subtitle.is_none()));
    Ok(())
}

/// Test that embedded tracks pair with the video that carries them
#[test]
fn test_plan_withEmbeddedTracks_shouldUseContainerSubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(dir, &["Ep01.mkv", "Ep02.mkv", "1.xml", "2.xml"])?;

    let probe = MockTrackProbe::new()
        .with_tracks("Ep01.mkv", vec![track(2, Some("chi"), Some("简体"))])
        .with_tracks("Ep02.mkv", vec![track(3, Some("chi"), None)]);
    let controller = controller(Config::default(), probe)?;
    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(report.strategy, SubtitleStrategy::Ranked);
    let first = report.episodes[0].subtitle.as_deref().unwrap_or_default();
    assert!(first.contains("Ep01.mkv"));
    assert!(first.contains("track 2"));
    assert!(first.contains("Chinese (chi)"));
    assert!(first.contains("简体"));
    let second = report.episodes[1].subtitle.as_deref().unwrap_or_default();
    assert!(second.contains("Ep02.mkv (track 3"));
    Ok(())
}

/// Test that a failing probe is treated as a video without embedded tracks
#[test]
fn test_plan_withFailingProbe_shouldContinueWithExternalSubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(dir, &["Ep01.mkv", "Ep02.mkv", "Ep01.ass", "Ep02.ass", "1.xml", "2.xml"])?;

    let probe = MockTrackProbe::new().failing_on("Ep01.mkv");
    let controller = controller(Config::default(), probe)?;
    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(report.episodes.len(), 2);
    assert_eq!(report.episodes[0].subtitle, Some(dir.join("Ep01.ass").display().to_string()));
    Ok(())
}

/// Test that probing can be switched off
#[test]
fn test_plan_withProbingDisabled_shouldNotCallProbe() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(dir, &["Ep01.mkv", "1.xml"])?;

    let mut config = Config::default();
    config.discovery.probe_embedded = false;
    let probe = Arc::new(MockTrackProbe::new().with_tracks("Ep01.mkv", vec![track(0, None, None)]));
    common::init_test_logging();
    let controller = Controller::with_probe(config, probe.clone())?;

    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(probe.call_count(), 0);
    assert_eq!(report.episodes[0].subtitle, None);
    Ok(())
}

/// Test that track listing never runs more ffprobe processes than configured
#[test]
fn test_plan_withManyVideos_shouldBoundConcurrentTrackListing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let names: Vec<String> = (1..=40)
        .map(|i| format!("Ep {}.mkv", i))
        .chain((1..=40).map(|i| format!("{}.xml", i)))
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    common::create_series(dir, &names)?;

    let mut config = Config::default();
    config.discovery.max_concurrent_probes = 3;
    let probe = Arc::new(
        MockTrackProbe::new()
            .with_delay(Duration::from_millis(5))
            .with_tracks("Ep 1.mkv", vec![track(0, Some("chi"), None)]),
    );
    common::init_test_logging();
    let controller = Controller::with_probe(config, probe.clone())?;

    let report = plan(&controller, dir, &Selection::all())?;

    assert_eq!(probe.call_count(), 40);
    assert!(probe.max_in_flight() <= 3, "max in flight: {}", probe.max_in_flight());
    assert!(probe.max_in_flight() > 1);
    assert_eq!(report.episodes.len(), 40);
    Ok(())
}

/// Test that episode selection keeps only the requested episodes
#[test]
fn test_plan_withSelection_shouldKeepRequestedEpisodes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(dir, &["Ep 1.mkv", "Ep 2.mkv", "Ep 3.mkv", "1.xml", "2.xml", "3.xml"])?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let report = plan(&controller, dir, &Selection::only([2]))?;

    assert_eq!(report.episodes.len(), 1);
    assert_eq!(report.episodes[0].episode, 2);
    assert_eq!(report.episodes[0].comments, dir.join("2.xml"));
    Ok(())
}

/// Test that regex filters narrow down the videos
#[test]
fn test_plan_withVideoFilter_shouldOnlyPlanMatchingVideos() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(
        dir,
        &["Show 1 [1080p].mkv", "Show 2 [1080p].mkv", "Show 1 [720p].mkv", "1.xml", "2.xml"],
    )?;

    let mut config = Config::default();
    config.filters.videos.push(r"\[1080p\]".to_string());
    let controller = controller(config, MockTrackProbe::new())?;
    let report = plan(&controller, dir, &Selection::all())?;

    let videos: Vec<_> = report.episodes.iter().map(|e| e.video.clone()).collect();
    assert_eq!(
        videos,
        vec![dir.join("Show 1 [1080p].mkv"), dir.join("Show 2 [1080p].mkv")]
    );
    Ok(())
}

/// Test that videos with no usable numbering are reported as an error
#[test]
fn test_plan_withUnorderableVideos_shouldFailWithOrderNotInferred() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_series(dir, &["Pilot.mkv", "Finale.mkv", "1.xml"])?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let error = plan(&controller, dir, &Selection::all()).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<AlignError>(),
        Some(AlignError::OrderNotInferred { count: 2 })
    ));
    Ok(())
}

/// Test that an empty directory gives an empty plan
#[test]
fn test_plan_withEmptyDirectory_shouldReturnEmptyPlan() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = controller(Config::default(), MockTrackProbe::new())?;
    let report = plan(&controller, temp_dir.path(), &Selection::all())?;

    assert!(report.episodes.is_empty());
    assert!(report.unplaced_videos.is_empty());
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_withProbe_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.tag = String::new();

    assert!(Controller::with_probe(config, Arc::new(MockTrackProbe::new())).is_err());
}
