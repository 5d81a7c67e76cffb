//! Import preview example: rewriting an exported document for display

use cms_richtext_converter::blob::{BlobRegistry, MemoryBlobRegistry};
use cms_richtext_converter::charset::decode_html;
use cms_richtext_converter::image::{ImageFile, partition_images};
use cms_richtext_converter::preview::PreviewRewriter;

const EXPORTED_ARTICLE: &[u8] = b"<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"windows-1252\">\n\
<base href=\"https://docs.example.com/document/d/abc123/\">\n\
<title>Caf\xe9 Guide</title>\n\
</head>\n\
<body>\n\
<h1>Caf\xe9 Guide</h1>\n\
<p>Our favourite spots, with photos.</p>\n\
<img src=\"images/Pic 1.png\" alt=\"terrace\">\n\
<img src=\"images/map.gif\">\n\
<img src=\"https://cdn.example.com/logo.png\" alt=\"logo\">\n\
<img src=\"images/not-included.png\" alt=\"missing\">\n\
</body>\n\
</html>\n";

fn main() {
    println!("=== CMS Richtext Converter - Import Preview Example ===\n");

    // Decode the export (it declares windows-1252)
    let html = decode_html(EXPORTED_ARTICLE);
    println!("Decoded document:\n{}", html);

    // The author picked these files alongside the document
    let picked = vec![
        ImageFile::new("Pic 1.PNG", "image/png", b"png bytes here".to_vec()),
        ImageFile::new("map.gif", "image/gif", b"gif bytes here".to_vec()),
        ImageFile::new("draft.txt", "text/plain", b"not an image".to_vec()),
    ];
    let (images, rejected) = partition_images(picked);
    for file in &rejected {
        println!("Skipping non-image file: {}", file.filename);
    }
    println!();

    // Rewrite for preview
    let mut registry = MemoryBlobRegistry::new();
    let preview = PreviewRewriter::new()
        .rewrite(&html, &images, &mut registry)
        .expect("in-memory registration cannot fail");

    println!("Preview document:\n{}", preview.html);
    println!("Live blob handles:");
    for (image, handle) in images.iter().zip(&preview.handles) {
        println!("  {} -> {}", image.filename, handle);
    }
    println!();
    println!("Note: the remote logo and the missing file are left untouched\n");

    // Dismissing the preview releases every handle
    for handle in &preview.handles {
        registry.release(handle);
    }
    println!(
        "After dismissal the registry holds {} blobs",
        registry.len()
    );
}
