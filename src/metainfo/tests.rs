use std::io::Write;

use super::*;
use crate::bencode::BencodeError;

const SINGLE_INFO: &[u8] =
    b"d6:lengthi1024e4:name8:file.txt12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaae";
const SINGLE_INFO_HASH: &str = "5e73478c8951a47213df390eedca1a9e580e47cb";

fn torrent_with_info(info: &[u8]) -> Vec<u8> {
    let mut data = b"d8:announce37:udp://tracker.example.com:80/announce4:info".to_vec();
    data.extend_from_slice(info);
    data.push(b'e');
    data
}

fn multi_file_torrent() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"d");
    data.extend_from_slice(b"13:announce-listll");
    data.extend_from_slice(b"37:udp://tracker.example.com:80/announce");
    data.extend_from_slice(b"29:http://backup.example.org/annee");
    data.extend_from_slice(b"7:comment5:hello");
    data.extend_from_slice(b"10:created by7:tester1");
    data.extend_from_slice(b"13:creation datei1700000000e");
    data.extend_from_slice(b"4:infod5:filesl");
    data.extend_from_slice(b"d6:lengthi100e6:md5sum32:0123456789abcdef0123456789abcdef4:pathl3:dir5:a.txtee");
    data.extend_from_slice(b"d6:lengthi250e4:pathl5:b.binee");
    data.extend_from_slice(b"e4:name6:bundle12:piece lengthi262144e6:pieces0:e");
    data.extend_from_slice(b"e");
    data
}

#[test]
fn test_parse_single_file() {
    let torrent = Metainfo::from_bytes(&torrent_with_info(SINGLE_INFO)).unwrap();

    assert_eq!(
        torrent.announce.as_deref(),
        Some("udp://tracker.example.com:80/announce")
    );
    assert_eq!(torrent.info.name.as_deref(), Some("file.txt"));
    assert_eq!(torrent.info.length, Some(1024));
    assert_eq!(torrent.info.piece_length, Some(16384));
    assert_eq!(torrent.info.piece_count(), 1);
    assert_eq!(torrent.info.piece_hashes().next(), Some(&[b'a'; 20][..]));
    assert!(!torrent.info.is_multi_file());
    assert_eq!(torrent.total_size, 1024);
    assert!(torrent.announce_list.is_empty());
    assert_eq!(torrent.creation_date, None);
}

#[test]
fn test_info_hash_matches_known_digest() {
    let torrent = Metainfo::from_bytes(&torrent_with_info(SINGLE_INFO)).unwrap();
    assert_eq!(torrent.info_hash.to_hex(), SINGLE_INFO_HASH);
    assert_eq!(torrent.raw_info().as_ref(), SINGLE_INFO);
    assert_eq!(torrent.info_hash, InfoHash::from_info_bytes(SINGLE_INFO));
}

#[test]
fn test_info_hash_independent_of_key_order() {
    let unsorted: &[u8] =
        b"d4:name8:file.txt6:pieces20:aaaaaaaaaaaaaaaaaaaa6:lengthi1024e12:piece lengthi16384ee";
    let torrent = Metainfo::from_bytes(&torrent_with_info(unsorted)).unwrap();
    assert_eq!(torrent.info_hash.to_hex(), SINGLE_INFO_HASH);
    assert_eq!(torrent.raw_info().as_ref(), SINGLE_INFO);
}

#[test]
fn test_info_hash_includes_unknown_keys() {
    let with_private: &[u8] = b"d6:lengthi1024e4:name8:file.txt12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaa7:privatei1e6:source3:abce";
    let torrent = Metainfo::from_bytes(&torrent_with_info(with_private)).unwrap();

    assert_ne!(torrent.info_hash.to_hex(), SINGLE_INFO_HASH);
    assert_eq!(torrent.info_hash, InfoHash::from_info_bytes(with_private));
    // The typed projection is the same either way.
    let plain = Metainfo::from_bytes(&torrent_with_info(SINGLE_INFO)).unwrap();
    assert_eq!(torrent.info, plain.info);
}

#[test]
fn test_parse_multi_file() {
    let torrent = Metainfo::from_bytes(&multi_file_torrent()).unwrap();

    assert_eq!(torrent.announce, None);
    assert_eq!(
        torrent.announce_list,
        vec![vec![
            "udp://tracker.example.com:80/announce".to_string(),
            "http://backup.example.org/ann".to_string(),
        ]]
    );
    assert_eq!(torrent.comment.as_deref(), Some("hello"));
    assert_eq!(torrent.created_by.as_deref(), Some("tester1"));
    assert_eq!(torrent.creation_date, Some(1_700_000_000));

    let info = &torrent.info;
    assert_eq!(info.name.as_deref(), Some("bundle"));
    assert_eq!(info.length, None);
    assert!(info.is_multi_file());
    assert_eq!(info.files.len(), 2);
    assert_eq!(info.files[0].path, vec!["dir", "a.txt"]);
    assert_eq!(
        info.files[0].md5sum.as_deref(),
        Some("0123456789abcdef0123456789abcdef")
    );
    assert_eq!(info.files[1].path, vec!["b.bin"]);
    assert_eq!(info.files[1].md5sum, None);
    assert_eq!(torrent.total_size, 350);
}

#[test]
fn test_wrong_shapes_are_absent() {
    let data: &[u8] = b"d8:announcei5e13:announce-list3:bad7:commentle13:creation date3:now4:infod6:lengthi-5e4:namei1e12:piece length2:xx6:piecesi0eee";
    let torrent = Metainfo::from_bytes(data).unwrap();

    assert_eq!(torrent.announce, None);
    assert!(torrent.announce_list.is_empty());
    assert_eq!(torrent.comment, None);
    assert_eq!(torrent.creation_date, None);
    assert_eq!(torrent.info.name, None);
    assert_eq!(torrent.info.length, None);
    assert_eq!(torrent.info.piece_length, None);
    assert!(torrent.info.pieces.is_empty());
    assert_eq!(torrent.total_size, 0);
}

#[test]
fn test_malformed_file_entries_skipped() {
    let info: &[u8] = b"d5:filesli7ed6:lengthi10e4:pathl1:ai3e1:beee4:name1:xe";
    let torrent = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();

    assert_eq!(torrent.info.files.len(), 1);
    assert_eq!(torrent.info.files[0].path, vec!["a", "b"]);
    assert_eq!(torrent.total_size, 10);
}

#[test]
fn test_non_utf8_text_is_lossy() {
    let info: &[u8] = b"d6:lengthi1e4:name4:caf\xe9e";
    let torrent = Metainfo::from_bytes(&torrent_with_info(info)).unwrap();
    assert_eq!(torrent.info.name.as_deref(), Some("caf\u{fffd}"));
    // The hash still covers the raw bytes.
    assert_eq!(torrent.raw_info().as_ref(), info);
}

#[test]
fn test_missing_info() {
    let err = Metainfo::from_bytes(b"d8:announce3:urle").unwrap_err();
    assert!(matches!(err, MetainfoError::MissingField("info")));

    let err = Metainfo::from_bytes(b"d4:info4:spame").unwrap_err();
    assert!(matches!(err, MetainfoError::MissingField("info")));

    let err = Metainfo::from_bytes(b"l4:infoe").unwrap_err();
    assert!(matches!(err, MetainfoError::MissingField("info")));
}

#[test]
fn test_bencode_error_propagates() {
    let err = Metainfo::from_bytes(b"d4:infod4:name").unwrap_err();
    assert!(matches!(
        err,
        MetainfoError::Bencode(BencodeError::UnexpectedEnd(_))
    ));
}

#[test]
fn test_trailing_bytes_ignored() {
    let mut data = torrent_with_info(SINGLE_INFO);
    data.extend_from_slice(b"\n\ntrailing junk");
    let torrent = Metainfo::from_bytes(&data).unwrap();
    assert_eq!(torrent.info_hash.to_hex(), SINGLE_INFO_HASH);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&multi_file_torrent()).unwrap();
    file.flush().unwrap();

    let torrent = Metainfo::from_file(file.path()).unwrap();
    assert_eq!(torrent.info.name.as_deref(), Some("bundle"));
    assert_eq!(torrent.total_size, 350);
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.torrent");

    let err = Metainfo::from_file(&path).unwrap_err();
    match err {
        MetainfoError::Io { path: p, source } => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_trackers_deduplicated() {
    let mut data = b"d8:announce29:http://backup.example.org/ann13:announce-listll".to_vec();
    data.extend_from_slice(b"37:udp://tracker.example.com:80/announce");
    data.extend_from_slice(b"29:http://backup.example.org/anne");
    data.extend_from_slice(b"l19:udp://10.0.0.1:6969ee4:info");
    data.extend_from_slice(SINGLE_INFO);
    data.push(b'e');

    let torrent = Metainfo::from_bytes(&data).unwrap();
    assert_eq!(
        torrent.trackers(),
        vec![
            "http://backup.example.org/ann",
            "udp://tracker.example.com:80/announce",
            "udp://10.0.0.1:6969",
        ]
    );
    assert_eq!(
        torrent.udp_trackers(),
        vec!["tracker.example.com:80", "10.0.0.1:6969"]
    );
}

#[test]
fn test_to_magnet_roundtrip() {
    let torrent = Metainfo::from_bytes(&multi_file_torrent()).unwrap();
    let magnet = torrent.to_magnet();

    assert_eq!(magnet.info_hash, torrent.info_hash);
    assert_eq!(magnet.display_name.as_deref(), Some("bundle"));
    assert_eq!(magnet.trackers.len(), 2);

    let parsed = MagnetLink::parse(&magnet.to_uri()).unwrap();
    assert_eq!(parsed, magnet);
    assert_eq!(parsed.udp_trackers, vec!["tracker.example.com:80"]);
}

#[test]
fn test_magnet_parse() {
    let magnet = MagnetLink::parse(
        "magnet:?xt=urn:btih:0123456789ABCDEF0123456789ABCDEF01234567&dn=Test&tr=udp://tracker.example.com:80/announce",
    )
    .unwrap();

    assert_eq!(
        magnet.info_hash.as_bytes(),
        &[
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x01, 0x23, 0x45, 0x67, 0x89, 0xab,
            0xcd, 0xef, 0x01, 0x23, 0x45, 0x67
        ]
    );
    assert_eq!(magnet.display_name, Some("Test".to_string()));
    assert_eq!(magnet.udp_trackers, vec!["tracker.example.com:80"]);
}

#[test]
fn test_magnet_percent_decoding() {
    let magnet = MagnetLink::parse(
        "magnet:?xt=urn:btih:0123456789abcdef0123456789abcdef01234567&dn=Big+Buck%20Bunny&tr=udp%3A%2F%2Fopen.example.net%3A1337%2Fannounce",
    )
    .unwrap();

    assert_eq!(magnet.display_name.as_deref(), Some("Big Buck Bunny"));
    assert_eq!(magnet.udp_trackers, vec!["open.example.net:1337"]);
}

#[test]
fn test_magnet_tracker_filtering() {
    let magnet = MagnetLink::parse(
        "magnet:?xt=urn:btih:0123456789abcdef0123456789abcdef01234567\
         &tr=http://tracker.example.com/announce\
         &tr=udp://a.example.com:80\
         &tr=wss://tracker.example.com\
         &tr=udp://b.example.com:6969/announce\
         &tr=udp://a.example.com:80",
    )
    .unwrap();

    assert_eq!(magnet.trackers.len(), 5);
    assert_eq!(
        magnet.udp_trackers,
        vec!["a.example.com:80", "b.example.com:6969", "a.example.com:80"]
    );
    assert_eq!(magnet.display_name, None);
}

#[test]
fn test_magnet_without_trackers() {
    let magnet =
        MagnetLink::parse("magnet:?xt=urn:btih:0123456789abcdef0123456789abcdef01234567").unwrap();
    assert!(magnet.trackers.is_empty());
    assert!(magnet.udp_trackers.is_empty());
}

#[test]
fn test_magnet_first_xt_wins() {
    let magnet = MagnetLink::parse(
        "magnet:?xt=urn:btih:0123456789abcdef0123456789abcdef01234567&xt=urn:btih:ffffffffffffffffffffffffffffffffffffffff",
    )
    .unwrap();
    assert_eq!(
        magnet.info_hash.to_hex(),
        "0123456789abcdef0123456789abcdef01234567"
    );
}

#[test]
fn test_magnet_missing_hash() {
    let err = MagnetLink::parse("magnet:?xt=urn:sha1:0123456789abcdef0123456789abcdef01234567")
        .unwrap_err();
    assert!(matches!(err, MetainfoError::MissingHash));

    let err = MagnetLink::parse("magnet:?dn=Test").unwrap_err();
    assert!(matches!(err, MetainfoError::MissingHash));
}

#[test]
fn test_magnet_invalid_hash() {
    for hash in [
        "zz23456789abcdef0123456789abcdef01234567",
        "0123456789abcdef0123456789abcdef0123456",
        "0123456789abcdef",
    ] {
        let uri = format!("magnet:?xt=urn:btih:{hash}");
        let err = MagnetLink::parse(&uri).unwrap_err();
        assert!(
            matches!(err, MetainfoError::InvalidHash(_)),
            "{hash}: {err:?}"
        );
    }
}

#[test]
fn test_magnet_invalid_uri() {
    let err = MagnetLink::parse("not a uri at all").unwrap_err();
    assert!(matches!(err, MetainfoError::InvalidUri(_)));
}

#[test]
fn test_magnet_builder_to_uri() {
    let hash = InfoHash::new([0x11; 20]);
    let magnet = MagnetLink::new(hash)
        .with_display_name("a b&c")
        .with_tracker("http://tracker.example.com/announce")
        .with_tracker("udp://tracker.example.com:80/announce");

    assert_eq!(magnet.udp_trackers, vec!["tracker.example.com:80"]);
    assert_eq!(
        magnet.to_uri(),
        "magnet:?xt=urn:btih:1111111111111111111111111111111111111111\
         &dn=a+b%26c\
         &tr=http%3A%2F%2Ftracker.example.com%2Fannounce\
         &tr=udp%3A%2F%2Ftracker.example.com%3A80%2Fannounce"
    );
}

#[test]
fn test_info_hash_hex() {
    let hash: InfoHash = "C12FE1C06BBA254A9DC9F519B335AA7C1367A88A".parse().unwrap();
    assert_eq!(hash.to_string(), "c12fe1c06bba254a9dc9f519b335aa7c1367a88a");
    assert_eq!(
        format!("{hash:?}"),
        "InfoHash(c12fe1c06bba254a9dc9f519b335aa7c1367a88a)"
    );
    assert!(InfoHash::from_bytes(&[0u8; 19]).is_err());
    assert!(InfoHash::from_hex("abc").is_err());
}
