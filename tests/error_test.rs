//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use pantry_ai_rust::error::PantryAiError;
use pantry_ai_rust::picker;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = picker::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, PantryAiError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = picker::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// PantryAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PantryAiError::Config("テスト設定エラー".to_string()),
        PantryAiError::FileNotFound("receipt.jpg".to_string()),
        PantryAiError::FolderNotFound("/path/to/folder".to_string()),
        PantryAiError::ImageLoad("receipt.jpg: permission denied".to_string()),
        PantryAiError::ApiCall("解析サーバがエラーを返しました (HTTP 500)".to_string()),
        PantryAiError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// ApiCallエラーにはサーバ由来のメッセージがそのまま残る
#[test]
fn test_api_call_message_preserved() {
    let err = PantryAiError::ApiCall("File must be an image".to_string());
    let display = format!("{}", err);

    assert!(display.contains("File must be an image"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = PantryAiError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PantryAiError = io_err.into();

    assert!(matches!(err, PantryAiError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PantryAiError = json_err.into();

    assert!(matches!(err, PantryAiError::JsonParse(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let common_err = pantry_ai_common::Error::Parse("パースエラー".to_string());
    let err: PantryAiError = common_err.into();

    assert!(matches!(err, PantryAiError::Common(_)));
}

/// エラーチェーン（透過的エラー）
#[test]
fn test_error_chain_transparent() {
    let common_err = pantry_ai_common::Error::Config("設定エラー".to_string());
    let err: PantryAiError = common_err.into();

    // 透過的エラーなのでメッセージがそのまま表示される
    let display = format!("{}", err);
    assert!(display.contains("設定エラー"));
}
