// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - 归档（archive）：把生成的文件打包为ZIP
/// - 文档（document）：把报告写成DOCX
/// - 存储（storage）：按运行划分的本地输出目录
pub mod archive;
pub mod document;
pub mod storage;
