// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use salvo::prelude::*;

#[handler]
pub async fn home(res: &mut Response) {
    res.render("OK");
}
