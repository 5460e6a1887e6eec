// src/plan.rs

use crate::{
    error::AppResult,
    models::{Course, DownloadPlan, KindSelection, PlanEntry},
    utils::{self, NameStyle},
};
use log::debug;
use std::path::{Path, PathBuf};

/// 课程标题对应的根目录 (相对路径)
pub fn course_dir(course: &Course, style: NameStyle) -> PathBuf {
    PathBuf::from(utils::sanitize_filename(&course.title, style))
}

/// 将课程结构展开为按顺序排列的下载计划，只保留用户选择的资源类型。
///
/// 目录结构: `<课程>/<i> - <小节>[ (week N)]/<i>.<j> - <讲座>.<扩展名>`
pub fn build_plan(
    course: &Course,
    selection: &KindSelection,
    output_root: &Path,
    style: NameStyle,
) -> AppResult<DownloadPlan> {
    let course_dir = course_dir(course, style);
    let mut entries = Vec::new();

    for (section_idx, section) in course.sections.iter().enumerate() {
        let section_ordinal = section_idx + 1;
        let section_dir = course_dir.join(utils::sanitize_filename(
            &format!("{} - {}", section_ordinal, section.display_name()),
            style,
        ));

        for lecture in &section.lectures {
            let stem = format!(
                "{}.{} - {}",
                section_ordinal,
                lecture.ordinal,
                utils::sanitize_filename(&lecture.title, style)
            );
            for resource in lecture
                .resources
                .iter()
                .filter(|r| selection.is_enabled(r.kind))
            {
                let relative = section_dir.join(format!("{}.{}", stem, resource.kind.extension()));
                entries.push(PlanEntry {
                    section_ordinal,
                    lecture_ordinal: lecture.ordinal,
                    kind: resource.kind,
                    url: resource.url.clone(),
                    destination: utils::secure_join_path(output_root, &relative)?,
                });
            }
        }
    }

    debug!("下载计划共 {} 项", entries.len());
    Ok(DownloadPlan::new(entries))
}
