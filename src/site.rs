//! Static site assembly: asset copying, templating and page generation.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::error::{Error, Result};

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Outcome of a full site build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub assets: usize,
    pub pages: usize,
}

/// Fill the template placeholders and prefix root-relative URLs with
/// `basepath`.
pub fn render_template(template: &str, title: &str, content: &str, basepath: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}"))
}

/// Replace `dest` with a recursive copy of `src`. Returns the number of files
/// copied.
pub fn copy_static(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(Error::io(
            src,
            io::Error::new(io::ErrorKind::NotFound, "static directory not found"),
        ));
    }
    if dest.exists() {
        debug!("Removing {}", dest.display());
        fs::remove_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    }
    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| Error::io(entry.path(), e))?;
            info!("Copied {} -> {}", entry.path().display(), target.display());
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render one markdown file through the template at `template_path`.
pub fn generate_page(from: &Path, template_path: &Path, dest: &Path, basepath: &str) -> Result<()> {
    let template = read(template_path)?;
    write_page(from, &template, dest, basepath)
}

/// Render every `.md` file under `content_dir` into the same relative path
/// under `dest_dir` with an `.html` extension. Returns the number of pages
/// written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    basepath: &str,
) -> Result<usize> {
    let template = read(template_path)?;

    let mut pages = 0;
    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(content_dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) != Some("md") {
            debug!("Skipping {}", path.display());
            continue;
        }
        let Ok(relative) = path.strip_prefix(content_dir) else {
            continue;
        };

        let dest = dest_dir.join(relative).with_extension("html");
        write_page(path, &template, &dest, basepath)?;
        pages += 1;
    }
    Ok(pages)
}

/// Copy static assets into the output directory, then generate all pages.
pub fn build(site: &SiteConfig) -> Result<BuildSummary> {
    let assets = copy_static(&site.static_dir, &site.output)?;
    let pages =
        generate_pages_recursive(&site.content, &site.template, &site.output, &site.basepath)?;
    Ok(BuildSummary { assets, pages })
}

fn write_page(from: &Path, template: &str, dest: &Path, basepath: &str) -> Result<()> {
    info!("Generating page from {} to {}", from.display(), dest.display());

    let markdown = read(from)?;
    let page_error = |source| Error::Page {
        path: from.to_path_buf(),
        source: Box::new(source),
    };
    let content = crate::markdown_to_html(&markdown).map_err(page_error)?;
    let title = crate::extract_title(&markdown).map_err(page_error)?;
    let page = render_template(template, &title, &content, basepath);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(dest, page).map_err(|e| Error::io(dest, e))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    Error::io(path, io::Error::from(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"<html><head><title>{{ Title }}</title><link href="/index.css"></head><body>{{ Content }}</body></html>"#;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn fills_placeholders() {
        let page = render_template(TEMPLATE, "Home", "<div></div>", "/");
        assert_eq!(
            page,
            r#"<html><head><title>Home</title><link href="/index.css"></head><body><div></div></body></html>"#
        );
    }

    #[test]
    fn rewrites_root_relative_urls() {
        let page = render_template(
            r#"<a href="/blog">{{ Title }}</a>{{ Content }}"#,
            "T",
            r#"<img src="/a.png" alt="a"></img><a href="https://x.org/">x</a>"#,
            "/site/",
        );
        assert_eq!(
            page,
            r#"<a href="/site/blog">T</a><img src="/site/a.png" alt="a"></img><a href="https://x.org/">x</a>"#
        );
    }

    #[test]
    fn copies_tree_and_clears_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("static");
        let dest = dir.path().join("public");
        write(&src.join("index.css"), "body {}");
        write(&src.join("images/logo.png"), "png");
        write(&dest.join("stale.html"), "old");

        let copied = copy_static(&src, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("index.css")).unwrap(), "body {}");
        assert_eq!(fs::read_to_string(dest.join("images/logo.png")).unwrap(), "png");
        assert!(!dest.join("stale.html").exists());
    }

    #[test]
    fn missing_static_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = copy_static(&dir.path().join("nope"), &dir.path().join("public"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn generates_single_page() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("index.md");
        let template = dir.path().join("template.html");
        let dest = dir.path().join("out/index.html");
        write(&from, "# Hello\n\nSome **bold** text");
        write(&template, TEMPLATE);

        generate_page(&from, &template, &dest, "/").unwrap();

        assert_eq!(
            fs::read_to_string(dest).unwrap(),
            r#"<html><head><title>Hello</title><link href="/index.css"></head><body><div><h1>Hello</h1><p>Some <b>bold</b> text</p></div></body></html>"#
        );
    }

    #[test]
    fn generates_pages_recursively() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        let template = dir.path().join("template.html");
        let public = dir.path().join("public");
        write(&content.join("index.md"), "# Home");
        write(&content.join("blog/first/index.md"), "# First\n\n[home](/)");
        write(&content.join("blog/notes.txt"), "not markdown");
        write(&template, "{{ Content }}");

        let pages = generate_pages_recursive(&content, &template, &public, "/repo/").unwrap();

        assert_eq!(pages, 2);
        assert_eq!(
            fs::read_to_string(public.join("index.html")).unwrap(),
            "<div><h1>Home</h1></div>"
        );
        assert_eq!(
            fs::read_to_string(public.join("blog/first/index.html")).unwrap(),
            r#"<div><h1>First</h1><p><a href="/repo/">home</a></p></div>"#
        );
        assert!(!public.join("blog/notes.txt").exists());
        assert!(!public.join("blog/notes.html").exists());
    }

    #[test]
    fn page_without_title_names_the_file() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        let template = dir.path().join("template.html");
        write(&content.join("untitled.md"), "no heading here");
        write(&template, TEMPLATE);

        let err =
            generate_pages_recursive(&content, &template, &dir.path().join("public"), "/")
                .unwrap_err();

        match err {
            Error::Page { path, source } => {
                assert_eq!(path, content.join("untitled.md"));
                assert!(matches!(*source, Error::MissingTitle));
            }
            other => panic!("expected page error, got {other:?}"),
        }
    }

    #[test]
    fn build_copies_assets_and_pages() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(&root.join("static/index.css"), "body {}");
        write(&root.join("content/index.md"), "# Site");
        write(&root.join("template.html"), TEMPLATE);

        let site = SiteConfig {
            content: root.join("content"),
            static_dir: root.join("static"),
            template: root.join("template.html"),
            output: root.join("public"),
            basepath: "/".to_string(),
        };
        let summary = build(&site).unwrap();

        assert_eq!(summary, BuildSummary { assets: 1, pages: 1 });
        assert!(root.join("public/index.css").exists());
        assert!(root.join("public/index.html").exists());
    }
}
