use std::fs;

use openlyrics_viewer::{
    decode, read_song, DecodeErrorKind, DirectoryAssets, MemoryAssets, Song, BUNDLED_SONG,
};

const REFERENCE_SONG: &str = r#"<song xmlns="http://openlyrics.info/namespace/2009/song">
  <properties><titles><title>Amazing Grace</title></titles>
    <songbooks><songbook name="Hymnal" entry="42"/></songbooks></properties>
  <lyrics><verse name="v1">Amazing grace<br/>how sweet the sound</verse></lyrics>
</song>"#;

fn verse_lines(song: &Song) -> Vec<Vec<String>> {
    song.lyrics()
        .iter()
        .map(|verse| {
            verse
                .lines()
                .iter()
                .map(|line| line.content().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn bundled_song_decodes_with_all_verses() {
    let song = read_song(&MemoryAssets::bundled(), BUNDLED_SONG).unwrap();

    assert_eq!(song.display_title(), "Amazing Grace");
    assert_eq!(song.properties().titles()[0].language(), Some("en"));
    assert_eq!(
        song.primary_songbook().map(|book| book.display_label()),
        Some("Hymnal, No. 42".to_string())
    );

    let names: Vec<&str> = song.lyrics().iter().map(|verse| verse.name()).collect();
    assert_eq!(names, vec!["v1", "v2", "v3", "v4"]);
    for lines in verse_lines(&song) {
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| !line.is_empty() && !line.contains("<br")));
    }
    assert_eq!(verse_lines(&song)[0][1], "that saved a wretch like me;");
}

#[test]
fn songs_load_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("hymns")).unwrap();
    fs::write(dir.path().join("hymns/grace.xml"), REFERENCE_SONG).unwrap();

    let assets = DirectoryAssets::new(dir.path());
    let song = read_song(&assets, "hymns/grace.xml").unwrap();
    assert_eq!(song, decode(REFERENCE_SONG).unwrap());
    assert_eq!(
        verse_lines(&song),
        vec![vec!["Amazing grace".to_string(), "how sweet the sound".to_string()]]
    );
}

#[test]
fn asset_and_document_failures_share_one_error_type() {
    let assets = MemoryAssets::new()
        .with("broken.xml", "<song xmlns=\"http://openlyrics.info/namespace/2009/song\"><properties>")
        .with("hymn.xml", "<hymn/>")
        .with(
            "untitled.xml",
            "<song xmlns=\"http://openlyrics.info/namespace/2009/song\"><properties/><lyrics/></song>",
        );

    let cases = [
        ("missing.xml", DecodeErrorKind::AssetNotFound),
        ("broken.xml", DecodeErrorKind::MalformedDocument),
        ("hymn.xml", DecodeErrorKind::UnexpectedRoot),
        ("untitled.xml", DecodeErrorKind::MissingRequiredField),
    ];
    for (path, kind) in cases {
        let err = read_song(&assets, path).unwrap_err();
        assert_eq!(err.kind(), kind, "{path}");
    }
}

#[test]
fn decoding_is_deterministic_across_threads() {
    let expected = decode(REFERENCE_SONG).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| decode(REFERENCE_SONG).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn pretty_printed_document_splits_exactly_at_breaks() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<song xmlns="http://openlyrics.info/namespace/2009/song" version="0.8">
  <properties>
    <titles>
      <title>Amazing Grace</title>
    </titles>
  </properties>
  <lyrics>
    <verse name="v1">
      <lines>
        Amazing grace how sweet the sound<br/>
        that saved a wretch like me;
      </lines>
    </verse>
    <verse name="c1">
      Through many dangers, toils and snares,<br />
      I have already come;<br/>
      <br/>
      'tis grace hath brought me safe thus far
    </verse>
  </lyrics>
</song>"#;

    let song = decode(xml).unwrap();
    assert_eq!(
        verse_lines(&song),
        vec![
            vec![
                "Amazing grace how sweet the sound".to_string(),
                "that saved a wretch like me;".to_string(),
            ],
            vec![
                "Through many dangers, toils and snares,".to_string(),
                "I have already come;".to_string(),
                String::new(),
                "'tis grace hath brought me safe thus far".to_string(),
            ],
        ]
    );
}
