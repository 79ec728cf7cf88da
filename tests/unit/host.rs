use std::io::Cursor;

use super::*;
use crate::config::Config;
use crate::test_support::{commit, user};

#[test]
fn decode_avatar_premultiplies() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let avatar = decode_avatar(&buf).unwrap();
    assert_eq!((avatar.width, avatar.height), (1, 1));
    assert_eq!(
        avatar.rgba8_premul,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
    assert!(avatar.to_paint().is_ok());
}

#[test]
fn decode_avatar_rejects_garbage() {
    assert!(decode_avatar(b"not an image").is_err());
}

#[test]
fn default_links_point_at_github() {
    let cfg = Config::default();
    let alice = user("alice", &[]);
    let c = commit("abc123", 0, 0, &[]);
    let vars = LinkVars {
        user: Some(&alice),
        commit: Some(&c),
        repository: Some("alice/repo"),
    };
    assert_eq!(
        render_link(&cfg.network.link, &vars),
        "https://github.com/alice/repo/commit/abc123"
    );
    assert_eq!(
        render_link(&cfg.y_axis.link, &vars),
        "https://github.com/alice/repo"
    );
    assert_eq!(
        render_link(&cfg.title.link, &vars),
        "https://github.com/alice/repo"
    );
}

#[test]
fn missing_values_render_empty() {
    assert_eq!(
        render_link("x/{{user.name}}/{{commit.id}}", &LinkVars::default()),
        "x//"
    );
}
