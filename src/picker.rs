//! レシート画像の選択
//!
//! フォルダ直下の画像ファイルを列挙し、対話プロンプトで1枚選ぶ

use crate::error::{PantryAiError, Result};
use dialoguer::Select;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "JPG", "JPEG", "PNG", "WEBP"];

/// フォルダ直下のレシート画像を列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(PantryAiError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                images.push(path.to_path_buf());
            }
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

/// 対話的にレシート画像を1枚選ぶ
///
/// キャンセル（Esc/q）ならNoneを返す。
pub fn choose_image(folder: &Path) -> Result<Option<PathBuf>> {
    let images = scan_folder(folder)?;

    if images.is_empty() {
        return Err(PantryAiError::NoImagesFound(folder.display().to_string()));
    }

    let labels: Vec<String> = images
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
        .collect();

    let selection = Select::new()
        .with_prompt("解析するレシート画像を選択")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| images[i].clone()))
}
